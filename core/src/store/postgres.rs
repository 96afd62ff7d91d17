// core/src/store/postgres.rs
use async_trait::async_trait;
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::QueryAs;
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use super::ProductStore;
use crate::error::StoreResult;
use crate::model::{NewProduct, Product, ProductChanges};
use crate::query::{ProductQuery, SqlParam};

const SELECT_BY_ID: &str = concat!("SELECT ", product_columns!(), " FROM ", products_table!(), " WHERE id = $1");

const INSERT: &str = concat!(
  "INSERT INTO ",
  products_table!(),
  " (name, price, quantity, image) VALUES ($1, $2, $3, $4) RETURNING ",
  product_columns!()
);

const UPDATE: &str = concat!(
  "UPDATE ",
  products_table!(),
  " SET name = COALESCE($1, name), price = COALESCE($2, price), quantity = COALESCE($3, quantity), \
   image = COALESCE($4, image), updated_at = NOW() WHERE id = $5 RETURNING ",
  product_columns!()
);

const DELETE: &str = concat!("DELETE FROM ", products_table!(), " WHERE id = $1 RETURNING ", product_columns!());

/// [`ProductStore`] over a Postgres connection pool.
///
/// The pool is owned by whoever builds the store; [`PgProductStore::close`]
/// is for the shutdown path.
#[derive(Debug, Clone)]
pub struct PgProductStore {
  pool: PgPool,
}

impl PgProductStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  pub async fn close(&self) {
    self.pool.close().await;
  }
}

fn bind_params<'q, O>(
  mut query: QueryAs<'q, Postgres, O, PgArguments>,
  params: &'q [SqlParam],
) -> QueryAs<'q, Postgres, O, PgArguments> {
  for param in params {
    query = match param {
      SqlParam::Text(text) => query.bind(text.as_str()),
      SqlParam::Decimal(value) => query.bind(*value),
      SqlParam::BigInt(value) => query.bind(*value),
    };
  }
  query
}

#[async_trait]
impl ProductStore for PgProductStore {
  #[instrument(name = "pg_store::count", skip_all)]
  async fn count(&self, query: &ProductQuery) -> StoreResult<u64> {
    let (total,): (i64,) = bind_params(sqlx::query_as(query.count_sql()), query.filter_params())
      .fetch_one(&self.pool)
      .await?;
    debug!(total, "Counted matching products.");
    Ok(u64::try_from(total).unwrap_or_default())
  }

  #[instrument(name = "pg_store::fetch_page", skip_all, fields(page = query.page(), limit = query.limit()))]
  async fn fetch_page(&self, query: &ProductQuery) -> StoreResult<Vec<Product>> {
    let params = query.page_params();
    let rows: Vec<Product> = bind_params(sqlx::query_as(query.page_sql()), &params)
      .fetch_all(&self.pool)
      .await?;
    debug!(rows = rows.len(), "Fetched product page.");
    Ok(rows)
  }

  #[instrument(name = "pg_store::find", skip(self))]
  async fn find(&self, id: Uuid) -> StoreResult<Option<Product>> {
    let row = sqlx::query_as::<_, Product>(SELECT_BY_ID)
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;
    Ok(row)
  }

  #[instrument(name = "pg_store::insert", skip_all)]
  async fn insert(&self, product: &NewProduct) -> StoreResult<Product> {
    let row = sqlx::query_as::<_, Product>(INSERT)
      .bind(product.name.as_str())
      .bind(product.price)
      .bind(product.quantity)
      .bind(product.image.as_deref())
      .fetch_one(&self.pool)
      .await?;
    debug!(product_id = %row.id, "Inserted product.");
    Ok(row)
  }

  #[instrument(name = "pg_store::update", skip(self, changes))]
  async fn update(&self, id: Uuid, changes: &ProductChanges) -> StoreResult<Option<Product>> {
    let row = sqlx::query_as::<_, Product>(UPDATE)
      .bind(changes.name.as_deref())
      .bind(changes.price)
      .bind(changes.quantity)
      .bind(changes.image.as_deref())
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;
    debug!(updated = row.is_some(), "Ran product update.");
    Ok(row)
  }

  #[instrument(name = "pg_store::delete", skip(self))]
  async fn delete(&self, id: Uuid) -> StoreResult<Option<Product>> {
    let row = sqlx::query_as::<_, Product>(DELETE)
      .bind(id)
      .fetch_optional(&self.pool)
      .await?;
    debug!(deleted = row.is_some(), "Ran product delete.");
    Ok(row)
  }

  async fn ping(&self) -> StoreResult<()> {
    sqlx::query("SELECT 1").execute(&self.pool).await?;
    Ok(())
  }
}
