use crate::error::DBError;
use chrono::NaiveDateTime;
use sqlx::SqliteConnection;

#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct SensorDao {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) category_id: i64,
    pub(crate) vessel_id: i64,
    pub(crate) created: NaiveDateTime,
    pub(crate) deleted: Option<NaiveDateTime>,
}

impl SensorDao {
    pub fn id(&self) -> i64 {
        self.id
    }
}

pub async fn insert(
    conn: &mut SqliteConnection,
    name: &str,
    category_id: i64,
    vessel_id: i64,
    created: NaiveDateTime,
) -> Result<SensorDao, DBError> {
    Ok(sql_stmnt!(
        SensorDao,
        r#"INSERT INTO sensors (name, category_id, vessel_id, created)
            VALUES (?1, ?2, ?3, ?4) RETURNING *"#,
        name,
        category_id,
        vessel_id,
        created
    )
    .fetch_one(&mut *conn)
    .await?)
}

/// READ all sensors which are not soft deleted
pub async fn read(conn: &mut SqliteConnection) -> Result<Vec<SensorDao>, DBError> {
    Ok(sql_stmnt!(
        SensorDao,
        "SELECT * FROM sensors WHERE deleted IS NULL ORDER BY id"
    )
    .fetch_all(&mut *conn)
    .await?)
}

pub async fn get(conn: &mut SqliteConnection, sensor_id: i64) -> Result<Option<SensorDao>, DBError> {
    Ok(
        sql_stmnt!(SensorDao, "SELECT * FROM sensors WHERE id = ?1", sensor_id)
            .fetch_optional(&mut *conn)
            .await?,
    )
}

pub async fn get_active(
    conn: &mut SqliteConnection,
    sensor_id: i64,
) -> Result<Option<SensorDao>, DBError> {
    Ok(sql_stmnt!(
        SensorDao,
        "SELECT * FROM sensors WHERE id = ?1 AND deleted IS NULL",
        sensor_id
    )
    .fetch_optional(&mut *conn)
    .await?)
}

pub async fn update(
    conn: &mut SqliteConnection,
    sensor_id: i64,
    name: Option<&str>,
    category_id: Option<i64>,
    vessel_id: Option<i64>,
) -> Result<(), DBError> {
    sql_stmnt!(
        r#"UPDATE sensors
            SET name = COALESCE(?2, name),
                category_id = COALESCE(?3, category_id),
                vessel_id = COALESCE(?4, vessel_id)
            WHERE id = ?1"#,
        sensor_id,
        name,
        category_id,
        vessel_id
    )
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn mark_deleted(
    conn: &mut SqliteConnection,
    sensor_id: i64,
    deleted: NaiveDateTime,
) -> Result<(), DBError> {
    sql_stmnt!(
        "UPDATE sensors SET deleted = ?2 WHERE id = ?1",
        sensor_id,
        deleted
    )
    .execute(&mut *conn)
    .await?;
    Ok(())
}
