use super::{changed, commit, now, unable, ResourceController};
use crate::error::ApiError;
use crate::models::vessel::{self, VesselDao, VesselSize};
use tracing::info;

impl ResourceController {
    pub async fn vessels(&self) -> Result<Vec<VesselDao>, ApiError> {
        let action = "Unable to retrieve vessels";
        let mut tx = self.begin(action).await?;
        let vessels = vessel::read(&mut tx).await.map_err(unable(action))?;
        commit(tx, action).await?;
        Ok(vessels)
    }

    pub async fn create_vessel(
        &self,
        name: String,
        location: String,
        size: Option<VesselSize>,
    ) -> Result<VesselDao, ApiError> {
        let action = "Unable to create vessel";
        let mut tx = self.begin(action).await?;
        let dao = vessel::insert(
            &mut tx,
            &name,
            size.unwrap_or_default(),
            &location,
            now(),
        )
        .await
        .map_err(unable(action))?;
        commit(tx, action).await?;

        info!(vessel_id = dao.id(), "Created vessel");
        Ok(dao)
    }

    pub async fn vessel(&self, vessel_id: i64) -> Result<VesselDao, ApiError> {
        let action = "Unable to retrieve vessel";
        let mut tx = self.begin(action).await?;
        let dao = vessel::get(&mut tx, vessel_id)
            .await
            .map_err(unable(action))?
            .ok_or(ApiError::NotFound("Vessel", vessel_id))?;
        commit(tx, action).await?;
        Ok(dao)
    }

    pub async fn update_vessel(
        &self,
        vessel_id: i64,
        name: Option<String>,
        location: Option<String>,
    ) -> Result<(), ApiError> {
        let action = "Unable to update vessel";
        let mut tx = self.begin(action).await?;
        vessel::get(&mut tx, vessel_id)
            .await
            .map_err(unable(action))?
            .ok_or(ApiError::NotFound("Vessel", vessel_id))?;

        let name = changed(name);
        let location = changed(location);
        vessel::update(&mut tx, vessel_id, name.as_deref(), location.as_deref())
            .await
            .map_err(unable(action))?;
        commit(tx, action).await?;

        info!(vessel_id, "Updated vessel");
        Ok(())
    }

    pub async fn delete_vessel(&self, vessel_id: i64) -> Result<(), ApiError> {
        let action = "Unable to delete vessel";
        let mut tx = self.begin(action).await?;
        vessel::get_active(&mut tx, vessel_id)
            .await
            .map_err(unable(action))?
            .ok_or(ApiError::NotFound("Vessel", vessel_id))?;
        vessel::mark_deleted(&mut tx, vessel_id, now())
            .await
            .map_err(unable(action))?;
        commit(tx, action).await?;

        info!(vessel_id, "Deleted vessel");
        Ok(())
    }
}
