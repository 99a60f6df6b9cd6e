use super::{changed, commit, now, unable, ResourceController};
use crate::error::ApiError;
use crate::models::{
    sensor::{self, SensorDao},
    sensor_category, vessel,
};
use sqlx::SqliteConnection;
use tracing::info;

impl ResourceController {
    pub async fn sensors(&self) -> Result<Vec<SensorDao>, ApiError> {
        let action = "Unable to retrieve sensors";
        let mut tx = self.begin(action).await?;
        let sensors = sensor::read(&mut tx).await.map_err(unable(action))?;
        commit(tx, action).await?;
        Ok(sensors)
    }

    pub async fn create_sensor(
        &self,
        name: String,
        vessel_id: i64,
        category_id: i64,
    ) -> Result<SensorDao, ApiError> {
        let action = "Unable to create sensor";
        let mut tx = self.begin(action).await?;
        ensure_vessel(&mut tx, vessel_id, action).await?;
        ensure_category(&mut tx, category_id, action).await?;

        let dao = sensor::insert(&mut tx, &name, category_id, vessel_id, now())
            .await
            .map_err(unable(action))?;
        commit(tx, action).await?;

        info!(sensor_id = dao.id(), vessel_id, category_id, "Created sensor");
        Ok(dao)
    }

    pub async fn sensor(&self, sensor_id: i64) -> Result<SensorDao, ApiError> {
        let action = "Unable to retrieve sensor";
        let mut tx = self.begin(action).await?;
        let dao = sensor::get(&mut tx, sensor_id)
            .await
            .map_err(unable(action))?
            .ok_or(ApiError::NotFound("Sensor", sensor_id))?;
        commit(tx, action).await?;
        Ok(dao)
    }

    pub async fn update_sensor(
        &self,
        sensor_id: i64,
        name: Option<String>,
        vessel_id: Option<i64>,
        category_id: Option<i64>,
    ) -> Result<(), ApiError> {
        let action = "Unable to update sensor";
        let mut tx = self.begin(action).await?;
        sensor::get(&mut tx, sensor_id)
            .await
            .map_err(unable(action))?
            .ok_or(ApiError::NotFound("Sensor", sensor_id))?;
        if let Some(category_id) = category_id {
            ensure_category(&mut tx, category_id, action).await?;
        }
        if let Some(vessel_id) = vessel_id {
            ensure_vessel(&mut tx, vessel_id, action).await?;
        }

        let name = changed(name);
        sensor::update(&mut tx, sensor_id, name.as_deref(), category_id, vessel_id)
            .await
            .map_err(unable(action))?;
        commit(tx, action).await?;

        info!(sensor_id, "Updated sensor");
        Ok(())
    }

    pub async fn delete_sensor(&self, sensor_id: i64) -> Result<(), ApiError> {
        let action = "Unable to delete sensor";
        let mut tx = self.begin(action).await?;
        sensor::get_active(&mut tx, sensor_id)
            .await
            .map_err(unable(action))?
            .ok_or(ApiError::NotFound("Sensor", sensor_id))?;
        sensor::mark_deleted(&mut tx, sensor_id, now())
            .await
            .map_err(unable(action))?;
        commit(tx, action).await?;

        info!(sensor_id, "Deleted sensor");
        Ok(())
    }
}

async fn ensure_vessel(
    conn: &mut SqliteConnection,
    vessel_id: i64,
    action: &'static str,
) -> Result<(), ApiError> {
    vessel::get_active(conn, vessel_id)
        .await
        .map_err(unable(action))?
        .ok_or(ApiError::NotFound("Vessel", vessel_id))?;
    Ok(())
}

async fn ensure_category(
    conn: &mut SqliteConnection,
    category_id: i64,
    action: &'static str,
) -> Result<(), ApiError> {
    sensor_category::get_active(conn, category_id)
        .await
        .map_err(unable(action))?
        .ok_or(ApiError::NotFound("Sensor category", category_id))?;
    Ok(())
}
