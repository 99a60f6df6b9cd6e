use super::build_response;
use crate::resource::ResourceController;
use std::sync::Arc;
use warp::Filter;

pub fn routes(
    controller: &Arc<ResourceController>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    health(controller.clone())
}

/// GET api/health
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "metric",
    responses((status = 200, description = "Service and database state", body = dto::HealthyDto))
)]
pub fn health(
    controller: Arc<ResourceController>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || controller.clone())
        .and(warp::path!("api" / "health"))
        .and(warp::get())
        .and_then(|controller: Arc<ResourceController>| async move {
            let database_state = controller.check_db().await;
            let ret = dto::HealthyDto {
                healthy: database_state == "healthy",
                database_state,
            };
            build_response(Ok(ret))
        })
        .boxed()
}

pub mod dto {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
    pub struct HealthyDto {
        pub healthy: bool,
        pub database_state: String,
    }
}
