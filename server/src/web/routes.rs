// server/src/web/routes.rs

use actix_web::{web, Resource};

use crate::errors::AppError;
use crate::web::handlers::{health_handlers, product_handlers};

/// JSON extractor settings: unparseable bodies get the standard 400 shape.
pub fn json_config() -> web::JsonConfig {
  web::JsonConfig::default().error_handler(|err, _req| AppError::MalformedBody(err.to_string()).into())
}

fn product_collection() -> [Resource; 2] {
  // "/api/products" and "/api/products/" both address the collection
  ["", "/"].map(|path| {
    web::resource(path)
      .route(web::get().to(product_handlers::list_products_handler))
      .route(web::post().to(product_handlers::create_product_handler))
  })
}

// This function will be called in `main.rs` to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  let [collection, collection_slash] = product_collection();
  cfg
    .app_data(json_config())
    .route("/", web::get().to(health_handlers::root_handler))
    .route("/health", web::get().to(health_handlers::health_check_handler))
    .service(
      web::scope("/api/products")
        .service(collection)
        .service(collection_slash)
        .service(
          web::resource("/{id}")
            .route(web::get().to(product_handlers::get_product_handler))
            .route(web::put().to(product_handlers::update_product_handler))
            .route(web::delete().to(product_handlers::delete_product_handler)),
        ),
    );
}
