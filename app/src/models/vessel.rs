use crate::error::DBError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::SqliteConnection;

/// Only 12cm pots exist so far
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema,
)]
pub enum VesselSize {
    #[default]
    #[serde(rename = "POT_TWELVE_CM")]
    PotTwelveCm,
}

impl VesselSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            VesselSize::PotTwelveCm => "POT_TWELVE_CM",
        }
    }
}

#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct VesselDao {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) size: String,
    pub(crate) location: String,
    pub(crate) created: NaiveDateTime,
    pub(crate) deleted: Option<NaiveDateTime>,
}

impl VesselDao {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &String {
        &self.name
    }

    pub fn location(&self) -> &String {
        &self.location
    }

    pub fn deleted(&self) -> Option<NaiveDateTime> {
        self.deleted
    }
}

pub async fn insert(
    conn: &mut SqliteConnection,
    name: &str,
    size: VesselSize,
    location: &str,
    created: NaiveDateTime,
) -> Result<VesselDao, DBError> {
    Ok(sql_stmnt!(
        VesselDao,
        "INSERT INTO vessels (name, size, location, created) VALUES (?1, ?2, ?3, ?4) RETURNING *",
        name,
        size.as_str(),
        location,
        created
    )
    .fetch_one(&mut *conn)
    .await?)
}

/// READ all vessels which are not soft deleted
pub async fn read(conn: &mut SqliteConnection) -> Result<Vec<VesselDao>, DBError> {
    Ok(sql_stmnt!(
        VesselDao,
        "SELECT * FROM vessels WHERE deleted IS NULL ORDER BY id"
    )
    .fetch_all(&mut *conn)
    .await?)
}

pub async fn get(conn: &mut SqliteConnection, vessel_id: i64) -> Result<Option<VesselDao>, DBError> {
    Ok(
        sql_stmnt!(VesselDao, "SELECT * FROM vessels WHERE id = ?1", vessel_id)
            .fetch_optional(&mut *conn)
            .await?,
    )
}

pub async fn get_active(
    conn: &mut SqliteConnection,
    vessel_id: i64,
) -> Result<Option<VesselDao>, DBError> {
    Ok(sql_stmnt!(
        VesselDao,
        "SELECT * FROM vessels WHERE id = ?1 AND deleted IS NULL",
        vessel_id
    )
    .fetch_optional(&mut *conn)
    .await?)
}

pub async fn update(
    conn: &mut SqliteConnection,
    vessel_id: i64,
    name: Option<&str>,
    location: Option<&str>,
) -> Result<(), DBError> {
    sql_stmnt!(
        r#"UPDATE vessels
            SET name = COALESCE(?2, name), location = COALESCE(?3, location)
            WHERE id = ?1"#,
        vessel_id,
        name,
        location
    )
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn mark_deleted(
    conn: &mut SqliteConnection,
    vessel_id: i64,
    deleted: NaiveDateTime,
) -> Result<(), DBError> {
    sql_stmnt!(
        "UPDATE vessels SET deleted = ?2 WHERE id = ?1",
        vessel_id,
        deleted
    )
    .execute(&mut *conn)
    .await?;
    Ok(())
}
