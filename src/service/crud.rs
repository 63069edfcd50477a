//! Generic CRUD execution against SQLite. Every mutation runs in one transaction.

use crate::error::AppError;
use crate::model::{EntityDescriptor, FieldValues, Record};
use crate::service::RequestValidator;
use crate::sql::{bind_params, delete, exists_by_id, insert, select_by_id, select_list, update, QueryBuf};
use sqlx::sqlite::{Sqlite, SqliteConnection, SqlitePool, SqliteRow};
use sqlx::Transaction;

/// Writers take the lock at BEGIN; a deferred transaction that reads first cannot
/// upgrade while another writer holds it and fails with SQLITE_BUSY.
const BEGIN_WRITE: &str = "BEGIN IMMEDIATE";

pub struct CrudService;

impl CrudService {
    /// Every stored row, in id order.
    pub async fn list(pool: &SqlitePool, entity: &EntityDescriptor) -> Result<Vec<Record>, AppError> {
        let q = select_list(entity);
        let mut conn = pool.acquire().await?;
        Self::query_many(&mut conn, entity, &q).await
    }

    /// Fetch one row by id; unknown id is `NotFound`.
    pub async fn get_by_id(pool: &SqlitePool, entity: &EntityDescriptor, id: i64) -> Result<Record, AppError> {
        let q = select_by_id(entity, id);
        let mut conn = pool.acquire().await?;
        Self::query_one(&mut conn, entity, &q)
            .await?
            .ok_or_else(|| not_found(entity, id))
    }

    /// Validate, then insert one row. Returns the stored record with its new id.
    pub async fn create(
        pool: &SqlitePool,
        entity: &EntityDescriptor,
        values: &FieldValues,
    ) -> Result<Record, AppError> {
        RequestValidator::validate(entity, values)?;
        let mut tx = pool.begin_with(BEGIN_WRITE).await?;
        let q = insert(entity, values);
        match Self::query_one(&mut tx, entity, &q).await {
            Ok(Some(record)) => {
                tx.commit().await?;
                tracing::info!(entity = entity.name, id = record.id, "created");
                Ok(record)
            }
            Ok(None) => {
                let err = AppError::Db(sqlx::Error::RowNotFound);
                rollback(tx, entity, "create", &err).await;
                Err(err)
            }
            Err(err) => {
                rollback(tx, entity, "create", &err).await;
                Err(err)
            }
        }
    }

    /// Overwrite every field of an existing row. Absent values are written as NULL.
    pub async fn update(
        pool: &SqlitePool,
        entity: &EntityDescriptor,
        id: i64,
        values: &FieldValues,
    ) -> Result<Record, AppError> {
        let mut tx = pool.begin_with(BEGIN_WRITE).await?;
        match Self::update_in(&mut tx, entity, id, values).await {
            Ok(record) => {
                tx.commit().await?;
                tracing::info!(entity = entity.name, id, "updated");
                Ok(record)
            }
            Err(err) => {
                rollback(tx, entity, "update", &err).await;
                Err(err)
            }
        }
    }

    pub async fn delete(pool: &SqlitePool, entity: &EntityDescriptor, id: i64) -> Result<(), AppError> {
        let mut tx = pool.begin_with(BEGIN_WRITE).await?;
        match Self::delete_in(&mut tx, entity, id).await {
            Ok(()) => {
                tx.commit().await?;
                tracing::info!(entity = entity.name, id, "deleted");
                Ok(())
            }
            Err(err) => {
                rollback(tx, entity, "delete", &err).await;
                Err(err)
            }
        }
    }

    async fn update_in(
        conn: &mut SqliteConnection,
        entity: &EntityDescriptor,
        id: i64,
        values: &FieldValues,
    ) -> Result<Record, AppError> {
        Self::require_exists(conn, entity, id).await?;
        RequestValidator::validate(entity, values)?;
        let q = update(entity, id, values);
        Self::query_one(conn, entity, &q)
            .await?
            .ok_or_else(|| not_found(entity, id))
    }

    async fn delete_in(conn: &mut SqliteConnection, entity: &EntityDescriptor, id: i64) -> Result<(), AppError> {
        Self::require_exists(conn, entity, id).await?;
        let q = delete(entity, id);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query (tx)");
        bind_params(sqlx::query(&q.sql), &q.params)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    async fn require_exists(conn: &mut SqliteConnection, entity: &EntityDescriptor, id: i64) -> Result<(), AppError> {
        let q = exists_by_id(entity, id);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let found = bind_params(sqlx::query(&q.sql), &q.params)
            .fetch_optional(&mut *conn)
            .await?;
        match found {
            Some(_) => Ok(()),
            None => Err(not_found(entity, id)),
        }
    }

    async fn query_one(
        conn: &mut SqliteConnection,
        entity: &EntityDescriptor,
        q: &QueryBuf,
    ) -> Result<Option<Record>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_params(sqlx::query(&q.sql), &q.params)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row.map(|r| row_to_record(&r, entity)).transpose()?)
    }

    async fn query_many(
        conn: &mut SqliteConnection,
        entity: &EntityDescriptor,
        q: &QueryBuf,
    ) -> Result<Vec<Record>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = bind_params(sqlx::query(&q.sql), &q.params)
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows
            .iter()
            .map(|r| row_to_record(r, entity))
            .collect::<Result<Vec<_>, _>>()?)
    }
}

fn not_found(entity: &EntityDescriptor, id: i64) -> AppError {
    AppError::NotFound(format!("{} {}", entity.name, id))
}

async fn rollback(tx: Transaction<'_, Sqlite>, entity: &EntityDescriptor, op: &'static str, cause: &AppError) {
    match tx.rollback().await {
        Ok(()) => tracing::warn!(entity = entity.name, op, error = %cause, "transaction rolled back"),
        Err(e) => tracing::error!(entity = entity.name, op, error = %e, "rollback failed"),
    }
}

fn row_to_record(row: &SqliteRow, entity: &EntityDescriptor) -> Result<Record, sqlx::Error> {
    use sqlx::Row;
    let id: i64 = row.try_get("id")?;
    let mut values = FieldValues::with_capacity(entity.fields.len());
    for name in entity.field_names() {
        let v: Option<String> = row.try_get(name)?;
        values.insert(name.to_string(), v);
    }
    Ok(Record { id, values })
}
