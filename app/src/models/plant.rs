use crate::error::DBError;
use chrono::NaiveDateTime;
use sqlx::SqliteConnection;

#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct PlantDao {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) vessel_id: i64,
    pub(crate) created: NaiveDateTime,
    pub(crate) deleted: Option<NaiveDateTime>,
}

impl PlantDao {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn vessel_id(&self) -> i64 {
        self.vessel_id
    }
}

pub async fn insert(
    conn: &mut SqliteConnection,
    name: &str,
    description: &str,
    vessel_id: i64,
    created: NaiveDateTime,
) -> Result<PlantDao, DBError> {
    Ok(sql_stmnt!(
        PlantDao,
        r#"INSERT INTO plants (name, description, vessel_id, created)
            VALUES (?1, ?2, ?3, ?4) RETURNING *"#,
        name,
        description,
        vessel_id,
        created
    )
    .fetch_one(&mut *conn)
    .await?)
}

/// READ all plants which are not soft deleted
pub async fn read(conn: &mut SqliteConnection) -> Result<Vec<PlantDao>, DBError> {
    Ok(sql_stmnt!(
        PlantDao,
        "SELECT * FROM plants WHERE deleted IS NULL ORDER BY id"
    )
    .fetch_all(&mut *conn)
    .await?)
}

pub async fn get(conn: &mut SqliteConnection, plant_id: i64) -> Result<Option<PlantDao>, DBError> {
    Ok(
        sql_stmnt!(PlantDao, "SELECT * FROM plants WHERE id = ?1", plant_id)
            .fetch_optional(&mut *conn)
            .await?,
    )
}

pub async fn get_active(
    conn: &mut SqliteConnection,
    plant_id: i64,
) -> Result<Option<PlantDao>, DBError> {
    Ok(sql_stmnt!(
        PlantDao,
        "SELECT * FROM plants WHERE id = ?1 AND deleted IS NULL",
        plant_id
    )
    .fetch_optional(&mut *conn)
    .await?)
}

pub async fn update(
    conn: &mut SqliteConnection,
    plant_id: i64,
    name: Option<&str>,
    description: Option<&str>,
    vessel_id: Option<i64>,
) -> Result<(), DBError> {
    sql_stmnt!(
        r#"UPDATE plants
            SET name = COALESCE(?2, name),
                description = COALESCE(?3, description),
                vessel_id = COALESCE(?4, vessel_id)
            WHERE id = ?1"#,
        plant_id,
        name,
        description,
        vessel_id
    )
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn mark_deleted(
    conn: &mut SqliteConnection,
    plant_id: i64,
    deleted: NaiveDateTime,
) -> Result<(), DBError> {
    sql_stmnt!(
        "UPDATE plants SET deleted = ?2 WHERE id = ?1",
        plant_id,
        deleted
    )
    .execute(&mut *conn)
    .await?;
    Ok(())
}
