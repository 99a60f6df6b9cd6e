use super::validation::{validated_as, Fields};
use super::{build_created_response, build_empty_response, build_response};
use crate::resource::ResourceController;
use std::sync::Arc;
use warp::Filter;

pub fn routes(
    controller: &Arc<ResourceController>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    list_sensors(controller.clone())
        .or(create_sensor(controller.clone()))
        .or(get_sensor(controller.clone()))
        .or(update_sensor(controller.clone()))
        .or(delete_sensor(controller.clone()))
}

/// GET api/v1/sensor
///
/// Also served as api/v1/sensors
#[utoipa::path(
    get,
    path = "/api/v1/sensor",
    tag = "sensor",
    responses((status = 200, description = "Active sensors", body = [dto::SensorDto]))
)]
pub fn list_sensors(
    controller: Arc<ResourceController>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || controller.clone())
        .and(warp::path!("sensor").or(warp::path!("sensors")).unify())
        .and(warp::get())
        .and_then(|controller: Arc<ResourceController>| async move {
            let resp = controller.sensors().await;
            let resp = resp.map(|s| s.into_iter().map(dto::SensorDto::from).collect::<Vec<_>>());
            build_response(resp)
        })
        .boxed()
}

/// POST api/v1/sensor
///
/// Vessel and category must exist and not be deleted
#[utoipa::path(
    post,
    path = "/api/v1/sensor",
    tag = "sensor",
    request_body = dto::CreateSensorDto,
    responses(
        (status = 201, description = "Sensor created", body = dto::SensorDto),
        (status = 400, description = "Missing field", body = super::ErrorResponseDto),
        (status = 404, description = "Unknown vessel or category", body = super::ErrorResponseDto)
    )
)]
pub fn create_sensor(
    controller: Arc<ResourceController>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || controller.clone())
        .and(warp::path!("sensor"))
        .and(warp::post())
        .and(validated_as::<dto::CreateSensorDto>(Fields::Required(&["name", "vessel", "category"])))
        .and_then(
            |controller: Arc<ResourceController>, body: dto::CreateSensorDto| async move {
                let resp = controller
                    .create_sensor(body.name, body.vessel, body.category)
                    .await;
                build_created_response(resp.map(dto::SensorDto::from))
            },
        )
        .boxed()
}

/// GET api/v1/sensor/:id
#[utoipa::path(
    get,
    path = "/api/v1/sensor/{id}",
    tag = "sensor",
    params(("id" = i64, Path, description = "Sensor id")),
    responses(
        (status = 200, description = "Sensor, deleted ones included", body = dto::SensorDto),
        (status = 404, description = "Unknown sensor", body = super::ErrorResponseDto)
    )
)]
pub fn get_sensor(
    controller: Arc<ResourceController>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || controller.clone())
        .and(warp::path!("sensor" / i64))
        .and(warp::get())
        .and_then(|controller: Arc<ResourceController>, sensor_id: i64| async move {
            let resp = controller.sensor(sensor_id).await;
            build_response(resp.map(dto::SensorDto::from))
        })
        .boxed()
}

/// PUT api/v1/sensor/:id
#[utoipa::path(
    put,
    path = "/api/v1/sensor/{id}",
    tag = "sensor",
    params(("id" = i64, Path, description = "Sensor id")),
    request_body = dto::UpdateSensorDto,
    responses(
        (status = 204, description = "Sensor updated"),
        (status = 400, description = "Field not permitted", body = super::ErrorResponseDto),
        (status = 404, description = "Unknown sensor, vessel or category", body = super::ErrorResponseDto)
    )
)]
pub fn update_sensor(
    controller: Arc<ResourceController>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || controller.clone())
        .and(warp::path!("sensor" / i64))
        .and(warp::put())
        .and(validated_as::<dto::UpdateSensorDto>(Fields::Allowed(&["name", "vessel", "category"])))
        .and_then(
            |controller: Arc<ResourceController>, sensor_id: i64, body: dto::UpdateSensorDto| async move {
                let resp = controller
                    .update_sensor(sensor_id, body.name, body.vessel, body.category)
                    .await;
                build_empty_response(resp)
            },
        )
        .boxed()
}

/// DELETE api/v1/sensor/:id
///
/// Readings of a deleted sensor are no longer served
#[utoipa::path(
    delete,
    path = "/api/v1/sensor/{id}",
    tag = "sensor",
    params(("id" = i64, Path, description = "Sensor id")),
    responses(
        (status = 204, description = "Sensor marked as deleted"),
        (status = 404, description = "Unknown or already deleted sensor", body = super::ErrorResponseDto)
    )
)]
pub fn delete_sensor(
    controller: Arc<ResourceController>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || controller.clone())
        .and(warp::path!("sensor" / i64))
        .and(warp::delete())
        .and_then(|controller: Arc<ResourceController>, sensor_id: i64| async move {
            let resp = controller.delete_sensor(sensor_id).await;
            build_empty_response(resp)
        })
        .boxed()
}

///
/// DTO
///
pub mod dto {
    use crate::models::sensor::SensorDao;
    use crate::rest::validation::optional_id;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
    pub struct SensorDto {
        pub id: i64,
        pub name: String,
        /// Id of the sensor category
        pub category: i64,
        /// Id of the vessel the sensor is placed in
        pub vessel: i64,
        #[serde(with = "europa_core::timestamp")]
        #[schema(value_type = String, example = "2018-03-01T12:30:05")]
        pub created: NaiveDateTime,
        #[serde(default, with = "europa_core::timestamp::option")]
        #[schema(value_type = Option<String>)]
        pub deleted: Option<NaiveDateTime>,
    }

    impl From<SensorDao> for SensorDto {
        fn from(dao: SensorDao) -> Self {
            SensorDto {
                id: dao.id,
                name: dao.name,
                category: dao.category_id,
                vessel: dao.vessel_id,
                created: dao.created,
                deleted: dao.deleted,
            }
        }
    }

    #[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
    pub struct CreateSensorDto {
        pub name: String,
        pub vessel: i64,
        pub category: i64,
    }

    #[derive(Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
    pub struct UpdateSensorDto {
        #[serde(default)]
        pub name: Option<String>,
        #[serde(default, deserialize_with = "optional_id")]
        #[schema(value_type = Option<i64>)]
        pub vessel: Option<i64>,
        #[serde(default, deserialize_with = "optional_id")]
        #[schema(value_type = Option<i64>)]
        pub category: Option<i64>,
    }
}
