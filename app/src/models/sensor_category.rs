use crate::error::DBError;
use chrono::NaiveDateTime;
use sqlx::SqliteConnection;

#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct SensorCategoryDao {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) units: String,
    pub(crate) created: NaiveDateTime,
    pub(crate) deleted: Option<NaiveDateTime>,
}

impl SensorCategoryDao {
    pub fn id(&self) -> i64 {
        self.id
    }
}

pub async fn insert(
    conn: &mut SqliteConnection,
    name: &str,
    units: &str,
    created: NaiveDateTime,
) -> Result<SensorCategoryDao, DBError> {
    Ok(sql_stmnt!(
        SensorCategoryDao,
        "INSERT INTO sensor_categories (name, units, created) VALUES (?1, ?2, ?3) RETURNING *",
        name,
        units,
        created
    )
    .fetch_one(&mut *conn)
    .await?)
}

/// READ all categories which are not soft deleted
pub async fn read(conn: &mut SqliteConnection) -> Result<Vec<SensorCategoryDao>, DBError> {
    Ok(sql_stmnt!(
        SensorCategoryDao,
        "SELECT * FROM sensor_categories WHERE deleted IS NULL ORDER BY id"
    )
    .fetch_all(&mut *conn)
    .await?)
}

pub async fn get(
    conn: &mut SqliteConnection,
    category_id: i64,
) -> Result<Option<SensorCategoryDao>, DBError> {
    Ok(sql_stmnt!(
        SensorCategoryDao,
        "SELECT * FROM sensor_categories WHERE id = ?1",
        category_id
    )
    .fetch_optional(&mut *conn)
    .await?)
}

pub async fn get_active(
    conn: &mut SqliteConnection,
    category_id: i64,
) -> Result<Option<SensorCategoryDao>, DBError> {
    Ok(sql_stmnt!(
        SensorCategoryDao,
        "SELECT * FROM sensor_categories WHERE id = ?1 AND deleted IS NULL",
        category_id
    )
    .fetch_optional(&mut *conn)
    .await?)
}

pub async fn update(
    conn: &mut SqliteConnection,
    category_id: i64,
    name: Option<&str>,
    units: Option<&str>,
) -> Result<(), DBError> {
    sql_stmnt!(
        r#"UPDATE sensor_categories
            SET name = COALESCE(?2, name), units = COALESCE(?3, units)
            WHERE id = ?1"#,
        category_id,
        name,
        units
    )
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn mark_deleted(
    conn: &mut SqliteConnection,
    category_id: i64,
    deleted: NaiveDateTime,
) -> Result<(), DBError> {
    sql_stmnt!(
        "UPDATE sensor_categories SET deleted = ?2 WHERE id = ?1",
        category_id,
        deleted
    )
    .execute(&mut *conn)
    .await?;
    Ok(())
}
