use super::validation::{validated_as, Fields};
use super::{build_created_response, build_response};
use crate::error::ApiError;
use crate::resource::ResourceController;
use std::sync::Arc;
use warp::Filter;

pub fn routes(
    controller: &Arc<ResourceController>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    sensor_data(controller.clone())
        .or(create_sensor_data(controller.clone()))
        .or(modify_sensor_data())
}

/// GET api/v1/sensor/:id/data
///
/// Returns the readings of the last 24 hours, oldest first
#[utoipa::path(
    get,
    path = "/api/v1/sensor/{id}/data",
    tag = "sensor data",
    params(("id" = i64, Path, description = "Sensor id")),
    responses((status = 200, description = "Readings inside the window", body = [dto::SensorDataDto]))
)]
pub fn sensor_data(
    controller: Arc<ResourceController>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || controller.clone())
        .and(warp::path!("sensor" / i64 / "data"))
        .and(warp::get())
        .and_then(|controller: Arc<ResourceController>, sensor_id: i64| async move {
            let resp = controller.sensor_data(sensor_id).await;
            let resp = resp.map(|d| d.into_iter().map(dto::SensorDataDto::from).collect::<Vec<_>>());
            build_response(resp)
        })
        .boxed()
}

/// POST api/v1/sensor/:id/data
///
/// Appends a reading, `value` must be a float
#[utoipa::path(
    post,
    path = "/api/v1/sensor/{id}/data",
    tag = "sensor data",
    params(("id" = i64, Path, description = "Sensor id")),
    request_body = dto::CreateSensorDataDto,
    responses(
        (status = 201, description = "Reading stored", body = dto::SensorDataDto),
        (status = 400, description = "Value is not a float", body = super::ErrorResponseDto),
        (status = 404, description = "Unknown or deleted sensor", body = super::ErrorResponseDto)
    )
)]
pub fn create_sensor_data(
    controller: Arc<ResourceController>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || controller.clone())
        .and(warp::path!("sensor" / i64 / "data"))
        .and(warp::post())
        .and(validated_as::<dto::CreateSensorDataDto>(Fields::Required(&["value"])))
        .and_then(
            |controller: Arc<ResourceController>, sensor_id: i64, body: dto::CreateSensorDataDto| async move {
                let resp = controller
                    .create_sensor_data(sensor_id, &body.value, body.created)
                    .await;
                build_created_response(resp.map(dto::SensorDataDto::from))
            },
        )
        .boxed()
}

/// PUT, DELETE api/v1/sensor/:id/data
///
/// Readings are write-once
#[utoipa::path(
    put,
    path = "/api/v1/sensor/{id}/data",
    tag = "sensor data",
    params(("id" = i64, Path, description = "Sensor id")),
    responses((status = 501, description = "Readings cannot be changed", body = super::ErrorResponseDto))
)]
pub fn modify_sensor_data() -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone
{
    warp::path!("sensor" / i64 / "data")
        .and(warp::put().or(warp::delete()).unify())
        .and_then(|_sensor_id: i64| async move {
            build_response::<()>(Err(ApiError::EndpointNotImplemented))
        })
        .boxed()
}

///
/// DTO
///
pub mod dto {
    use crate::models::sensor_data::SensorDataDao;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
    pub struct SensorDataDto {
        pub id: i64,
        pub value: f64,
        /// Id of the reporting sensor
        pub sensor: i64,
        #[serde(with = "europa_core::timestamp")]
        #[schema(value_type = String, example = "2018-03-01T12:30:05")]
        pub created: NaiveDateTime,
    }

    impl From<SensorDataDao> for SensorDataDto {
        fn from(dao: SensorDataDao) -> Self {
            SensorDataDto {
                id: dao.id,
                value: dao.value,
                sensor: dao.sensor_id,
                created: dao.created,
            }
        }
    }

    /// Same shape as `europa_core::SensorDataMessage`, the value stays raw
    /// until the sensor is known to exist.
    #[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
    pub struct CreateSensorDataDto {
        #[schema(value_type = f64, example = 21.5)]
        pub value: serde_json::Value,
        #[serde(default)]
        #[schema(example = "2018-03-01T12:30:05")]
        pub created: Option<String>,
    }
}
