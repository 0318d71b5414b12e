//! PostgreSQL gateway. Each session lazily opens one transaction; `commit` ends it and the
//! next write opens a fresh one. Tables live in a configurable schema (default `bookings`).

use super::{Entity, Gateway, Session};
use crate::error::StoreError;
use crate::model::{Booking, City, Hotel, Room, User};
use crate::sql;
use async_trait::async_trait;
use sqlx::{ConnectOptions, PgPool, Postgres, Transaction};
use std::str::FromStr;
use std::sync::Arc;

#[derive(Clone)]
pub struct PgGateway {
    pool: PgPool,
    schema: Arc<str>,
}

impl PgGateway {
    pub fn new(pool: PgPool, schema: impl Into<Arc<str>>) -> Self {
        PgGateway {
            pool,
            schema: schema.into(),
        }
    }

    /// Create the schema and the five entity tables if they do not exist.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(&sql::create_schema(&self.schema))
            .execute(&self.pool)
            .await?;
        for table in [City::TABLE, Hotel::TABLE, Room::TABLE, User::TABLE, Booking::TABLE] {
            let ddl = sql::create_table(&self.schema, &table);
            tracing::debug!(sql = %ddl, "ensure table");
            sqlx::query(&ddl).execute(&self.pool).await?;
        }
        tracing::info!(schema = %self.schema, "schema ready");
        Ok(())
    }
}

#[async_trait]
impl Gateway for PgGateway {
    type Session = PgSession;

    async fn begin(&self) -> Result<PgSession, StoreError> {
        Ok(PgSession {
            pool: self.pool.clone(),
            schema: self.schema.clone(),
            tx: None,
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

pub struct PgSession {
    pool: PgPool,
    schema: Arc<str>,
    tx: Option<Transaction<'static, Postgres>>,
}

impl PgSession {
    async fn tx(&mut self) -> Result<&mut Transaction<'static, Postgres>, StoreError> {
        let tx = match self.tx.take() {
            Some(tx) => tx,
            None => self.pool.begin().await?,
        };
        Ok(self.tx.insert(tx))
    }
}

#[async_trait]
impl Session for PgSession {
    async fn all<E: Entity>(&mut self) -> Result<Vec<E>, StoreError> {
        let sql = sql::select_all(&self.schema, &E::TABLE);
        tracing::debug!(sql = %sql, "query");
        let tx = self.tx().await?;
        let rows = sqlx::query_as::<_, E>(&sql).fetch_all(&mut **tx).await?;
        Ok(rows)
    }

    async fn find<E: Entity>(&mut self, id: &str) -> Result<Option<E>, StoreError> {
        let sql = sql::select_by_key(&self.schema, &E::TABLE);
        tracing::debug!(sql = %sql, id = %id, "query");
        let tx = self.tx().await?;
        let row = sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(row)
    }

    async fn insert<E: Entity>(&mut self, entity: &E) -> Result<(), StoreError> {
        let sql = sql::insert(&self.schema, &E::TABLE);
        tracing::debug!(sql = %sql, id = %entity.id(), "insert");
        let tx = self.tx().await?;
        entity.bind(sqlx::query(&sql)).execute(&mut **tx).await?;
        Ok(())
    }

    async fn replace<E: Entity>(&mut self, entity: &E) -> Result<(), StoreError> {
        let sql = sql::update(&self.schema, &E::TABLE);
        tracing::debug!(sql = %sql, id = %entity.id(), "update");
        let tx = self.tx().await?;
        let done = entity.bind(sqlx::query(&sql)).execute(&mut **tx).await?;
        if done.rows_affected() == 0 {
            return Err(StoreError::Missing {
                entity: E::LABEL,
                id: entity.id().to_string(),
            });
        }
        Ok(())
    }

    async fn remove<E: Entity>(&mut self, id: &str) -> Result<(), StoreError> {
        let sql = sql::delete(&self.schema, &E::TABLE);
        tracing::debug!(sql = %sql, id = %id, "delete");
        let tx = self.tx().await?;
        let done = sqlx::query(&sql).bind(id).execute(&mut **tx).await?;
        if done.rows_affected() == 0 {
            return Err(StoreError::Missing {
                entity: E::LABEL,
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), StoreError> {
        if let Some(tx) = self.tx.take() {
            tx.commit().await?;
        }
        Ok(())
    }
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| StoreError::InvalidUrl(e.to_string()))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", sql::quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), StoreError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| StoreError::InvalidUrl("no database path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres", base), db_name.to_string()))
}
