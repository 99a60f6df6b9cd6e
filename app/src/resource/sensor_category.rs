use super::{changed, commit, now, unable, ResourceController};
use crate::error::ApiError;
use crate::models::sensor_category::{self, SensorCategoryDao};
use tracing::info;

impl ResourceController {
    pub async fn sensor_categories(&self) -> Result<Vec<SensorCategoryDao>, ApiError> {
        let action = "Unable to retrieve sensor categories";
        let mut tx = self.begin(action).await?;
        let categories = sensor_category::read(&mut tx)
            .await
            .map_err(unable(action))?;
        commit(tx, action).await?;
        Ok(categories)
    }

    pub async fn create_sensor_category(
        &self,
        name: String,
        units: String,
    ) -> Result<SensorCategoryDao, ApiError> {
        let action = "Unable to create sensor category";
        let mut tx = self.begin(action).await?;
        let dao = sensor_category::insert(&mut tx, &name, &units, now())
            .await
            .map_err(unable(action))?;
        commit(tx, action).await?;

        info!(category_id = dao.id(), "Created sensor category");
        Ok(dao)
    }

    pub async fn sensor_category(&self, category_id: i64) -> Result<SensorCategoryDao, ApiError> {
        let action = "Unable to retrieve sensor category";
        let mut tx = self.begin(action).await?;
        let dao = sensor_category::get(&mut tx, category_id)
            .await
            .map_err(unable(action))?
            .ok_or(ApiError::NotFound("Sensor category", category_id))?;
        commit(tx, action).await?;
        Ok(dao)
    }

    pub async fn update_sensor_category(
        &self,
        category_id: i64,
        name: Option<String>,
        units: Option<String>,
    ) -> Result<(), ApiError> {
        let action = "Unable to update sensor category";
        let mut tx = self.begin(action).await?;
        sensor_category::get(&mut tx, category_id)
            .await
            .map_err(unable(action))?
            .ok_or(ApiError::NotFound("Sensor category", category_id))?;

        let name = changed(name);
        let units = changed(units);
        sensor_category::update(&mut tx, category_id, name.as_deref(), units.as_deref())
            .await
            .map_err(unable(action))?;
        commit(tx, action).await?;

        info!(category_id, "Updated sensor category");
        Ok(())
    }

    pub async fn delete_sensor_category(&self, category_id: i64) -> Result<(), ApiError> {
        let action = "Unable to delete sensor category";
        let mut tx = self.begin(action).await?;
        sensor_category::get_active(&mut tx, category_id)
            .await
            .map_err(unable(action))?
            .ok_or(ApiError::NotFound("Sensor category", category_id))?;
        sensor_category::mark_deleted(&mut tx, category_id, now())
            .await
            .map_err(unable(action))?;
        commit(tx, action).await?;

        info!(category_id, "Deleted sensor category");
        Ok(())
    }
}
