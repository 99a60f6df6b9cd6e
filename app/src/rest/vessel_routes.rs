use super::validation::{validated_as, Fields};
use super::{build_created_response, build_empty_response, build_response};
use crate::resource::ResourceController;
use std::sync::Arc;
use warp::Filter;

pub fn routes(
    controller: &Arc<ResourceController>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    list_vessels(controller.clone())
        .or(create_vessel(controller.clone()))
        .or(get_vessel(controller.clone()))
        .or(update_vessel(controller.clone()))
        .or(delete_vessel(controller.clone()))
}

/// GET api/v1/vessel
///
/// Returns all vessels which are not deleted
#[utoipa::path(
    get,
    path = "/api/v1/vessel",
    tag = "vessel",
    responses((status = 200, description = "Active vessels", body = [dto::VesselDto]))
)]
pub fn list_vessels(
    controller: Arc<ResourceController>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || controller.clone())
        .and(warp::path!("vessel"))
        .and(warp::get())
        .and_then(|controller: Arc<ResourceController>| async move {
            let resp = controller.vessels().await;
            build_response(resp.map(|v| v.into_iter().map(dto::VesselDto::from).collect::<Vec<_>>()))
        })
        .boxed()
}

/// POST api/v1/vessel
///
/// Returns the created vessel
#[utoipa::path(
    post,
    path = "/api/v1/vessel",
    tag = "vessel",
    request_body = dto::CreateVesselDto,
    responses(
        (status = 201, description = "Vessel created", body = dto::VesselDto),
        (status = 400, description = "Missing field", body = super::ErrorResponseDto),
        (status = 500, description = "Name and location already taken", body = super::ErrorResponseDto)
    )
)]
pub fn create_vessel(
    controller: Arc<ResourceController>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || controller.clone())
        .and(warp::path!("vessel"))
        .and(warp::post())
        .and(validated_as::<dto::CreateVesselDto>(Fields::Required(&["name", "location"])))
        .and_then(
            |controller: Arc<ResourceController>, body: dto::CreateVesselDto| async move {
                let resp = controller
                    .create_vessel(body.name, body.location, body.size)
                    .await;
                build_created_response(resp.map(dto::VesselDto::from))
            },
        )
        .boxed()
}

/// GET api/v1/vessel/:id
#[utoipa::path(
    get,
    path = "/api/v1/vessel/{id}",
    tag = "vessel",
    params(("id" = i64, Path, description = "Vessel id")),
    responses(
        (status = 200, description = "Vessel, deleted ones included", body = dto::VesselDto),
        (status = 404, description = "Unknown vessel", body = super::ErrorResponseDto)
    )
)]
pub fn get_vessel(
    controller: Arc<ResourceController>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || controller.clone())
        .and(warp::path!("vessel" / i64))
        .and(warp::get())
        .and_then(
            |controller: Arc<ResourceController>, vessel_id: i64| async move {
                let resp = controller.vessel(vessel_id).await;
                build_response(resp.map(dto::VesselDto::from))
            },
        )
        .boxed()
}

/// PUT api/v1/vessel/:id
///
/// Blank fields are left untouched
#[utoipa::path(
    put,
    path = "/api/v1/vessel/{id}",
    tag = "vessel",
    params(("id" = i64, Path, description = "Vessel id")),
    request_body = dto::UpdateVesselDto,
    responses(
        (status = 204, description = "Vessel updated"),
        (status = 400, description = "Field not permitted", body = super::ErrorResponseDto),
        (status = 404, description = "Unknown vessel", body = super::ErrorResponseDto)
    )
)]
pub fn update_vessel(
    controller: Arc<ResourceController>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || controller.clone())
        .and(warp::path!("vessel" / i64))
        .and(warp::put())
        .and(validated_as::<dto::UpdateVesselDto>(Fields::Allowed(&["name", "location"])))
        .and_then(
            |controller: Arc<ResourceController>, vessel_id: i64, body: dto::UpdateVesselDto| async move {
                let resp = controller
                    .update_vessel(vessel_id, body.name, body.location)
                    .await;
                build_empty_response(resp)
            },
        )
        .boxed()
}

/// DELETE api/v1/vessel/:id
#[utoipa::path(
    delete,
    path = "/api/v1/vessel/{id}",
    tag = "vessel",
    params(("id" = i64, Path, description = "Vessel id")),
    responses(
        (status = 204, description = "Vessel marked as deleted"),
        (status = 404, description = "Unknown or already deleted vessel", body = super::ErrorResponseDto)
    )
)]
pub fn delete_vessel(
    controller: Arc<ResourceController>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || controller.clone())
        .and(warp::path!("vessel" / i64))
        .and(warp::delete())
        .and_then(
            |controller: Arc<ResourceController>, vessel_id: i64| async move {
                let resp = controller.delete_vessel(vessel_id).await;
                build_empty_response(resp)
            },
        )
        .boxed()
}

///
/// DTO
///
pub mod dto {
    use crate::models::vessel::{VesselDao, VesselSize};
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
    pub struct VesselDto {
        pub id: i64,
        pub name: String,
        #[schema(example = "POT_TWELVE_CM")]
        pub size: String,
        pub location: String,
        #[serde(with = "europa_core::timestamp")]
        #[schema(value_type = String, example = "2018-03-01T12:30:05")]
        pub created: NaiveDateTime,
        #[serde(default, with = "europa_core::timestamp::option")]
        #[schema(value_type = Option<String>)]
        pub deleted: Option<NaiveDateTime>,
    }

    impl From<VesselDao> for VesselDto {
        fn from(dao: VesselDao) -> Self {
            VesselDto {
                id: dao.id,
                name: dao.name,
                size: dao.size,
                location: dao.location,
                created: dao.created,
                deleted: dao.deleted,
            }
        }
    }

    #[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
    pub struct CreateVesselDto {
        pub name: String,
        pub location: String,
        #[serde(default)]
        pub size: Option<VesselSize>,
    }

    #[derive(Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
    pub struct UpdateVesselDto {
        #[serde(default)]
        pub name: Option<String>,
        #[serde(default)]
        pub location: Option<String>,
    }
}
