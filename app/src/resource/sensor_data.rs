use super::{commit, now, unable, ResourceController};
use crate::error::ApiError;
use crate::models::{
    sensor,
    sensor_data::{self, SensorDataDao},
};
use chrono::Duration;
use europa_core::timestamp;
use serde_json::Value;
use tracing::{debug, info};

/// Readings older than this are not returned
pub const DATA_WINDOW_HOURS: i64 = 24;

impl ResourceController {
    /// Appends a reading to a live sensor.
    ///
    /// `value` must be a JSON float, integers are refused like any other type.
    /// `created` is the capture time, the server clock is used when absent.
    pub async fn create_sensor_data(
        &self,
        sensor_id: i64,
        value: &Value,
        created: Option<String>,
    ) -> Result<SensorDataDao, ApiError> {
        let action = "Unable to create sensor data";
        let mut tx = self.begin(action).await?;
        sensor::get_active(&mut tx, sensor_id)
            .await
            .map_err(unable(action))?
            .ok_or(ApiError::NotFound("Sensor", sensor_id))?;

        let value = value
            .as_f64()
            .filter(|_| value.is_f64())
            .ok_or_else(|| ApiError::InvalidClientRequest("Value must be a float!".to_owned()))?;
        let created = match created {
            Some(raw) => timestamp::parse(&raw).map(timestamp::truncate).map_err(|_| {
                ApiError::InvalidClientRequest(format!(
                    "'created' must match {}",
                    timestamp::FORMAT
                ))
            })?,
            None => now(),
        };

        let dao = sensor_data::insert(&mut tx, sensor_id, value, created)
            .await
            .map_err(unable(action))?;
        commit(tx, action).await?;

        debug!(sensor_id, value, "Stored sensor data");
        Ok(dao)
    }

    /// All readings of a live sensor within the trailing window
    pub async fn sensor_data(&self, sensor_id: i64) -> Result<Vec<SensorDataDao>, ApiError> {
        let action = "Unable to retrieve sensor data";
        let since = now() - Duration::hours(DATA_WINDOW_HOURS);
        let mut tx = self.begin(action).await?;
        let data = sensor_data::get_since(&mut tx, sensor_id, since)
            .await
            .map_err(unable(action))?;
        commit(tx, action).await?;

        info!(sensor_id, count = data.len(), "Fetched sensor data");
        Ok(data)
    }
}
