use crate::error::DBError;
use chrono::NaiveDateTime;
use sqlx::SqliteConnection;

#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct SensorDataDao {
    pub(crate) id: i64,
    pub(crate) value: f64,
    pub(crate) sensor_id: i64,
    pub(crate) created: NaiveDateTime,
}

pub async fn insert(
    conn: &mut SqliteConnection,
    sensor_id: i64,
    value: f64,
    created: NaiveDateTime,
) -> Result<SensorDataDao, DBError> {
    Ok(sql_stmnt!(
        SensorDataDao,
        "INSERT INTO sensor_data (value, sensor_id, created) VALUES (?1, ?2, ?3) RETURNING *",
        value,
        sensor_id,
        created
    )
    .fetch_one(&mut *conn)
    .await?)
}

/// READ the readings of a live sensor, created at or after `since`
pub async fn get_since(
    conn: &mut SqliteConnection,
    sensor_id: i64,
    since: NaiveDateTime,
) -> Result<Vec<SensorDataDao>, DBError> {
    Ok(sql_stmnt!(
        SensorDataDao,
        r#"SELECT sd.id, sd.value, sd.sensor_id, sd.created
            FROM sensor_data AS sd
            JOIN sensors ON (sd.sensor_id = sensors.id)
            WHERE sd.sensor_id = ?1
            AND sensors.deleted IS NULL
            AND sd.created >= ?2
            ORDER BY sd.created ASC, sd.id ASC"#,
        sensor_id,
        since
    )
    .fetch_all(&mut *conn)
    .await?)
}
