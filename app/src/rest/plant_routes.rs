use super::validation::{validated_as, Fields};
use super::{build_created_response, build_empty_response, build_response};
use crate::resource::ResourceController;
use std::sync::Arc;
use warp::Filter;

pub fn routes(
    controller: &Arc<ResourceController>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    list_plants(controller.clone())
        .or(create_plant(controller.clone()))
        .or(get_plant(controller.clone()))
        .or(update_plant(controller.clone()))
        .or(delete_plant(controller.clone()))
}

/// GET api/v1/plant
///
/// Also served as api/v1/plants
#[utoipa::path(
    get,
    path = "/api/v1/plant",
    tag = "plant",
    responses((status = 200, description = "Active plants", body = [dto::PlantDto]))
)]
pub fn list_plants(
    controller: Arc<ResourceController>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || controller.clone())
        .and(warp::path!("plant").or(warp::path!("plants")).unify())
        .and(warp::get())
        .and_then(|controller: Arc<ResourceController>| async move {
            let resp = controller.plants().await;
            let resp = resp.map(|p| p.into_iter().map(dto::PlantDto::from).collect::<Vec<_>>());
            build_response(resp)
        })
        .boxed()
}

/// POST api/v1/plant
///
/// The referenced vessel must exist and not be deleted
#[utoipa::path(
    post,
    path = "/api/v1/plant",
    tag = "plant",
    request_body = dto::CreatePlantDto,
    responses(
        (status = 201, description = "Plant created", body = dto::PlantDto),
        (status = 400, description = "Missing field", body = super::ErrorResponseDto),
        (status = 404, description = "Unknown vessel", body = super::ErrorResponseDto),
        (status = 500, description = "Name already taken in this vessel", body = super::ErrorResponseDto)
    )
)]
pub fn create_plant(
    controller: Arc<ResourceController>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || controller.clone())
        .and(warp::path!("plant"))
        .and(warp::post())
        .and(validated_as::<dto::CreatePlantDto>(Fields::Required(&["name", "vessel", "description"])))
        .and_then(
            |controller: Arc<ResourceController>, body: dto::CreatePlantDto| async move {
                let resp = controller
                    .create_plant(body.name, body.description, body.vessel)
                    .await;
                build_created_response(resp.map(dto::PlantDto::from))
            },
        )
        .boxed()
}

/// GET api/v1/plant/:id
#[utoipa::path(
    get,
    path = "/api/v1/plant/{id}",
    tag = "plant",
    params(("id" = i64, Path, description = "Plant id")),
    responses(
        (status = 200, description = "Plant, deleted ones included", body = dto::PlantDto),
        (status = 404, description = "Unknown plant", body = super::ErrorResponseDto)
    )
)]
pub fn get_plant(
    controller: Arc<ResourceController>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || controller.clone())
        .and(warp::path!("plant" / i64))
        .and(warp::get())
        .and_then(|controller: Arc<ResourceController>, plant_id: i64| async move {
            let resp = controller.plant(plant_id).await;
            build_response(resp.map(dto::PlantDto::from))
        })
        .boxed()
}

/// PUT api/v1/plant/:id
#[utoipa::path(
    put,
    path = "/api/v1/plant/{id}",
    tag = "plant",
    params(("id" = i64, Path, description = "Plant id")),
    request_body = dto::UpdatePlantDto,
    responses(
        (status = 204, description = "Plant updated"),
        (status = 400, description = "Field not permitted", body = super::ErrorResponseDto),
        (status = 404, description = "Unknown plant or vessel", body = super::ErrorResponseDto)
    )
)]
pub fn update_plant(
    controller: Arc<ResourceController>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || controller.clone())
        .and(warp::path!("plant" / i64))
        .and(warp::put())
        .and(validated_as::<dto::UpdatePlantDto>(Fields::Allowed(&["name", "description", "vessel"])))
        .and_then(
            |controller: Arc<ResourceController>, plant_id: i64, body: dto::UpdatePlantDto| async move {
                let resp = controller
                    .update_plant(plant_id, body.name, body.description, body.vessel)
                    .await;
                build_empty_response(resp)
            },
        )
        .boxed()
}

/// DELETE api/v1/plant/:id
#[utoipa::path(
    delete,
    path = "/api/v1/plant/{id}",
    tag = "plant",
    params(("id" = i64, Path, description = "Plant id")),
    responses(
        (status = 204, description = "Plant marked as deleted"),
        (status = 404, description = "Unknown or already deleted plant", body = super::ErrorResponseDto)
    )
)]
pub fn delete_plant(
    controller: Arc<ResourceController>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || controller.clone())
        .and(warp::path!("plant" / i64))
        .and(warp::delete())
        .and_then(|controller: Arc<ResourceController>, plant_id: i64| async move {
            let resp = controller.delete_plant(plant_id).await;
            build_empty_response(resp)
        })
        .boxed()
}

///
/// DTO
///
pub mod dto {
    use crate::models::plant::PlantDao;
    use crate::rest::validation::optional_id;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
    pub struct PlantDto {
        pub id: i64,
        pub name: String,
        pub description: String,
        /// Id of the vessel the plant grows in
        pub vessel: i64,
        #[serde(with = "europa_core::timestamp")]
        #[schema(value_type = String, example = "2018-03-01T12:30:05")]
        pub created: NaiveDateTime,
        #[serde(default, with = "europa_core::timestamp::option")]
        #[schema(value_type = Option<String>)]
        pub deleted: Option<NaiveDateTime>,
    }

    impl From<PlantDao> for PlantDto {
        fn from(dao: PlantDao) -> Self {
            PlantDto {
                id: dao.id,
                name: dao.name,
                description: dao.description,
                vessel: dao.vessel_id,
                created: dao.created,
                deleted: dao.deleted,
            }
        }
    }

    #[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
    pub struct CreatePlantDto {
        pub name: String,
        pub description: String,
        pub vessel: i64,
    }

    #[derive(Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
    pub struct UpdatePlantDto {
        #[serde(default)]
        pub name: Option<String>,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default, deserialize_with = "optional_id")]
        #[schema(value_type = Option<i64>)]
        pub vessel: Option<i64>,
    }
}
