use crate::config::CONFIG;
use crate::error::DBError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

macro_rules! sql_stmnt {
    ($ret:ident, $stmt:expr) => {
        sqlx::query_as::<_, $ret>($stmt)
    };
    ($stmt:expr) => {
        sqlx::query($stmt)
    };
    ($ret:ident, $stmt:expr, $($bind:expr),*) => {
        sqlx::query_as::<_, $ret>($stmt)$(.bind($bind))*
    };
    ($stmt:expr, $($bind:expr),*) => {
        sqlx::query($stmt)$(.bind($bind))*
    };
}

pub async fn establish_db_connection() -> Result<SqlitePool, DBError> {
    connect(CONFIG.database_url(), CONFIG.database_max_connections()).await
}

pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, DBError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    // an in-memory database lives and dies with its single connection
    let in_memory = database_url.contains(":memory:");
    let max_connections = if in_memory { 1 } else { max_connections };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .min_connections(if in_memory { 1 } else { 0 })
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    Ok(pool)
}

pub async fn run_migrations(conn: &SqlitePool) -> Result<(), DBError> {
    sqlx::migrate!("./migrations").run(conn).await?;
    Ok(())
}

pub async fn check_schema(conn: &SqlitePool) -> Result<(), DBError> {
    sql_stmnt!("SELECT count(*) FROM vessels")
        .fetch_one(conn)
        .await?;
    Ok(())
}

#[cfg(test)]
pub(crate) async fn connect_test_db() -> SqlitePool {
    let conn = connect("sqlite::memory:", 1).await.unwrap();
    run_migrations(&conn).await.unwrap();
    conn
}

pub mod plant;
pub mod sensor;
pub mod sensor_category;
pub mod sensor_data;
pub mod vessel;

#[cfg(test)]
mod test;
