use super::{category_routes, data_routes, metric_routes, plant_routes, sensor_routes, vessel_routes};
use utoipa::OpenApi;
use warp::Filter;

#[derive(OpenApi)]
#[openapi(
    info(title = "Europa", description = "Greenhouse monitoring API"),
    paths(
        vessel_routes::list_vessels,
        vessel_routes::create_vessel,
        vessel_routes::get_vessel,
        vessel_routes::update_vessel,
        vessel_routes::delete_vessel,
        plant_routes::list_plants,
        plant_routes::create_plant,
        plant_routes::get_plant,
        plant_routes::update_plant,
        plant_routes::delete_plant,
        category_routes::list_categories,
        category_routes::create_category,
        category_routes::get_category,
        category_routes::update_category,
        category_routes::delete_category,
        sensor_routes::list_sensors,
        sensor_routes::create_sensor,
        sensor_routes::get_sensor,
        sensor_routes::update_sensor,
        sensor_routes::delete_sensor,
        data_routes::sensor_data,
        data_routes::create_sensor_data,
        data_routes::modify_sensor_data,
        metric_routes::health,
    ),
    components(schemas(
        super::ErrorResponseDto,
        crate::models::vessel::VesselSize,
        vessel_routes::dto::VesselDto,
        vessel_routes::dto::CreateVesselDto,
        vessel_routes::dto::UpdateVesselDto,
        plant_routes::dto::PlantDto,
        plant_routes::dto::CreatePlantDto,
        plant_routes::dto::UpdatePlantDto,
        category_routes::dto::SensorCategoryDto,
        category_routes::dto::CreateSensorCategoryDto,
        category_routes::dto::UpdateSensorCategoryDto,
        sensor_routes::dto::SensorDto,
        sensor_routes::dto::CreateSensorDto,
        sensor_routes::dto::UpdateSensorDto,
        data_routes::dto::SensorDataDto,
        data_routes::dto::CreateSensorDataDto,
        metric_routes::dto::HealthyDto,
    )),
    tags(
        (name = "vessel", description = "Pots and trays"),
        (name = "plant"),
        (name = "sensor category", description = "What a sensor measures, and in which units"),
        (name = "sensor"),
        (name = "sensor data", description = "Append-only readings"),
        (name = "metric"),
    )
)]
pub struct ApiDoc;

/// GET api/doc/api.json
pub fn routes() -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let api = ApiDoc::openapi();
    warp::path!("api" / "doc" / "api.json")
        .and(warp::get())
        .map(move || warp::reply::json(&api))
}
