use crate::error::{ApiError, DBError};
use chrono::{NaiveDateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::fmt::Debug;
use std::sync::Arc;
use tracing::error;

pub mod plant;
pub mod sensor;
pub mod sensor_category;
pub mod sensor_data;
pub mod vessel;

#[cfg(test)]
mod test;

/// Owns the database handle for the lifetime of the process.
/// Each public operation runs exactly one transaction.
pub struct ResourceController {
    pub(crate) db_conn: SqlitePool,
}

impl Debug for ResourceController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceController").finish()
    }
}

impl ResourceController {
    pub fn new(db_conn: SqlitePool) -> Arc<Self> {
        Arc::new(ResourceController { db_conn })
    }

    pub async fn check_db(&self) -> String {
        match crate::models::check_schema(&self.db_conn).await {
            Ok(_) => "healthy".to_owned(),
            Err(e) => format!("{}", e),
        }
    }

    async fn begin(&self, action: &'static str) -> Result<Transaction<'_, Sqlite>, ApiError> {
        self.db_conn
            .begin()
            .await
            .map_err(|e| unable(action)(DBError::from(e)))
    }
}

async fn commit(tx: Transaction<'_, Sqlite>, action: &'static str) -> Result<(), ApiError> {
    tx.commit()
        .await
        .map_err(|e| unable(action)(DBError::from(e)))
}

/// Maps a storage failure to a 500, the dropped transaction rolls back.
fn unable(action: &'static str) -> impl FnOnce(DBError) -> ApiError {
    move |err| {
        error!(error = %err, "{}", action);
        ApiError::InternalServerError(action.to_owned())
    }
}

fn now() -> NaiveDateTime {
    europa_core::timestamp::truncate(Utc::now().naive_utc())
}

/// Absent, null and empty values leave a field untouched on update.
fn changed(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
