use super::{changed, commit, now, unable, ResourceController};
use crate::error::ApiError;
use crate::models::{
    plant::{self, PlantDao},
    vessel,
};
use tracing::info;

impl ResourceController {
    pub async fn plants(&self) -> Result<Vec<PlantDao>, ApiError> {
        let action = "Unable to retrieve plants";
        let mut tx = self.begin(action).await?;
        let plants = plant::read(&mut tx).await.map_err(unable(action))?;
        commit(tx, action).await?;
        Ok(plants)
    }

    pub async fn create_plant(
        &self,
        name: String,
        description: String,
        vessel_id: i64,
    ) -> Result<PlantDao, ApiError> {
        let action = "Unable to create plant";
        let mut tx = self.begin(action).await?;
        vessel::get_active(&mut tx, vessel_id)
            .await
            .map_err(unable(action))?
            .ok_or(ApiError::NotFound("Vessel", vessel_id))?;

        let dao = plant::insert(&mut tx, &name, &description, vessel_id, now())
            .await
            .map_err(unable(action))?;
        commit(tx, action).await?;

        info!(plant_id = dao.id(), vessel_id, "Created plant");
        Ok(dao)
    }

    pub async fn plant(&self, plant_id: i64) -> Result<PlantDao, ApiError> {
        let action = "Unable to retrieve plant";
        let mut tx = self.begin(action).await?;
        let dao = plant::get(&mut tx, plant_id)
            .await
            .map_err(unable(action))?
            .ok_or(ApiError::NotFound("Plant", plant_id))?;
        commit(tx, action).await?;
        Ok(dao)
    }

    pub async fn update_plant(
        &self,
        plant_id: i64,
        name: Option<String>,
        description: Option<String>,
        vessel_id: Option<i64>,
    ) -> Result<(), ApiError> {
        let action = "Unable to update plant";
        let mut tx = self.begin(action).await?;
        plant::get(&mut tx, plant_id)
            .await
            .map_err(unable(action))?
            .ok_or(ApiError::NotFound("Plant", plant_id))?;
        if let Some(vessel_id) = vessel_id {
            vessel::get_active(&mut tx, vessel_id)
                .await
                .map_err(unable(action))?
                .ok_or(ApiError::NotFound("Vessel", vessel_id))?;
        }

        let name = changed(name);
        let description = changed(description);
        plant::update(
            &mut tx,
            plant_id,
            name.as_deref(),
            description.as_deref(),
            vessel_id,
        )
        .await
        .map_err(unable(action))?;
        commit(tx, action).await?;

        info!(plant_id, "Updated plant");
        Ok(())
    }

    pub async fn delete_plant(&self, plant_id: i64) -> Result<(), ApiError> {
        let action = "Unable to delete plant";
        let mut tx = self.begin(action).await?;
        plant::get_active(&mut tx, plant_id)
            .await
            .map_err(unable(action))?
            .ok_or(ApiError::NotFound("Plant", plant_id))?;
        plant::mark_deleted(&mut tx, plant_id, now())
            .await
            .map_err(unable(action))?;
        commit(tx, action).await?;

        info!(plant_id, "Deleted plant");
        Ok(())
    }
}
