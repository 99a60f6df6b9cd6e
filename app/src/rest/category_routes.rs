use super::validation::{validated_as, Fields};
use super::{build_created_response, build_empty_response, build_response};
use crate::resource::ResourceController;
use std::sync::Arc;
use warp::Filter;

pub fn routes(
    controller: &Arc<ResourceController>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    list_categories(controller.clone())
        .or(create_category(controller.clone()))
        .or(get_category(controller.clone()))
        .or(update_category(controller.clone()))
        .or(delete_category(controller.clone()))
}

/// GET api/v1/sensor/category
///
/// Also served as api/v1/sensor/categories
#[utoipa::path(
    get,
    path = "/api/v1/sensor/category",
    tag = "sensor category",
    responses((status = 200, description = "Active categories", body = [dto::SensorCategoryDto]))
)]
pub fn list_categories(
    controller: Arc<ResourceController>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || controller.clone())
        .and(
            warp::path!("sensor" / "category")
                .or(warp::path!("sensor" / "categories"))
                .unify(),
        )
        .and(warp::get())
        .and_then(|controller: Arc<ResourceController>| async move {
            let resp = controller.sensor_categories().await;
            let resp = resp.map(|c| {
                c.into_iter()
                    .map(dto::SensorCategoryDto::from)
                    .collect::<Vec<_>>()
            });
            build_response(resp)
        })
        .boxed()
}

/// POST api/v1/sensor/category
#[utoipa::path(
    post,
    path = "/api/v1/sensor/category",
    tag = "sensor category",
    request_body = dto::CreateSensorCategoryDto,
    responses(
        (status = 201, description = "Category created", body = dto::SensorCategoryDto),
        (status = 400, description = "Missing field", body = super::ErrorResponseDto)
    )
)]
pub fn create_category(
    controller: Arc<ResourceController>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || controller.clone())
        .and(warp::path!("sensor" / "category"))
        .and(warp::post())
        .and(validated_as::<dto::CreateSensorCategoryDto>(Fields::Required(&["name", "units"])))
        .and_then(
            |controller: Arc<ResourceController>, body: dto::CreateSensorCategoryDto| async move {
                let resp = controller
                    .create_sensor_category(body.name, body.units)
                    .await;
                build_created_response(resp.map(dto::SensorCategoryDto::from))
            },
        )
        .boxed()
}

/// GET api/v1/sensor/category/:id
#[utoipa::path(
    get,
    path = "/api/v1/sensor/category/{id}",
    tag = "sensor category",
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category, deleted ones included", body = dto::SensorCategoryDto),
        (status = 404, description = "Unknown category", body = super::ErrorResponseDto)
    )
)]
pub fn get_category(
    controller: Arc<ResourceController>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || controller.clone())
        .and(warp::path!("sensor" / "category" / i64))
        .and(warp::get())
        .and_then(
            |controller: Arc<ResourceController>, category_id: i64| async move {
                let resp = controller.sensor_category(category_id).await;
                build_response(resp.map(dto::SensorCategoryDto::from))
            },
        )
        .boxed()
}

/// PUT api/v1/sensor/category/:id
#[utoipa::path(
    put,
    path = "/api/v1/sensor/category/{id}",
    tag = "sensor category",
    params(("id" = i64, Path, description = "Category id")),
    request_body = dto::UpdateSensorCategoryDto,
    responses(
        (status = 204, description = "Category updated"),
        (status = 400, description = "Field not permitted", body = super::ErrorResponseDto),
        (status = 404, description = "Unknown category", body = super::ErrorResponseDto)
    )
)]
pub fn update_category(
    controller: Arc<ResourceController>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || controller.clone())
        .and(warp::path!("sensor" / "category" / i64))
        .and(warp::put())
        .and(validated_as::<dto::UpdateSensorCategoryDto>(Fields::Allowed(&["name", "units"])))
        .and_then(
            |controller: Arc<ResourceController>,
             category_id: i64,
             body: dto::UpdateSensorCategoryDto| async move {
                let resp = controller
                    .update_sensor_category(category_id, body.name, body.units)
                    .await;
                build_empty_response(resp)
            },
        )
        .boxed()
}

/// DELETE api/v1/sensor/category/:id
#[utoipa::path(
    delete,
    path = "/api/v1/sensor/category/{id}",
    tag = "sensor category",
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 204, description = "Category marked as deleted"),
        (status = 404, description = "Unknown or already deleted category", body = super::ErrorResponseDto)
    )
)]
pub fn delete_category(
    controller: Arc<ResourceController>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || controller.clone())
        .and(warp::path!("sensor" / "category" / i64))
        .and(warp::delete())
        .and_then(
            |controller: Arc<ResourceController>, category_id: i64| async move {
                let resp = controller.delete_sensor_category(category_id).await;
                build_empty_response(resp)
            },
        )
        .boxed()
}

///
/// DTO
///
pub mod dto {
    use crate::models::sensor_category::SensorCategoryDao;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
    pub struct SensorCategoryDto {
        pub id: i64,
        pub name: String,
        #[schema(example = "Percent")]
        pub units: String,
        #[serde(with = "europa_core::timestamp")]
        #[schema(value_type = String, example = "2018-03-01T12:30:05")]
        pub created: NaiveDateTime,
        #[serde(default, with = "europa_core::timestamp::option")]
        #[schema(value_type = Option<String>)]
        pub deleted: Option<NaiveDateTime>,
    }

    impl From<SensorCategoryDao> for SensorCategoryDto {
        fn from(dao: SensorCategoryDao) -> Self {
            SensorCategoryDto {
                id: dao.id,
                name: dao.name,
                units: dao.units,
                created: dao.created,
                deleted: dao.deleted,
            }
        }
    }

    #[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
    pub struct CreateSensorCategoryDto {
        pub name: String,
        pub units: String,
    }

    #[derive(Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
    pub struct UpdateSensorCategoryDto {
        #[serde(default)]
        pub name: Option<String>,
        #[serde(default)]
        pub units: Option<String>,
    }
}
