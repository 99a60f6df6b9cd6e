use super::*;
use crate::models::{connect_test_db, sensor_data, vessel::VesselSize};
use chrono::Duration;
use serde_json::json;

async fn build_controller() -> Arc<ResourceController> {
    ResourceController::new(connect_test_db().await)
}

#[tokio::test]
async fn test_check_db() {
    let controller = build_controller().await;
    assert_eq!("healthy", controller.check_db().await);
}

#[tokio::test]
async fn test_vessel_lifecycle() {
    // Prepare
    let controller = build_controller().await;
    let created = controller
        .create_vessel("V1".to_owned(), "Shelf A".to_owned(), None)
        .await
        .unwrap();
    assert_eq!(VesselSize::PotTwelveCm.as_str(), created.size);

    // Execute
    controller
        .update_vessel(created.id(), Some(String::new()), Some("Shelf B".to_owned()))
        .await
        .unwrap();
    controller.delete_vessel(created.id()).await.unwrap();

    // Validate
    let fetched = controller.vessel(created.id()).await.unwrap();
    assert_eq!("V1", fetched.name());
    assert_eq!("Shelf B", fetched.location());
    assert!(fetched.deleted().is_some());
    assert!(controller.vessels().await.unwrap().is_empty());
    assert!(matches!(
        controller.delete_vessel(created.id()).await,
        Err(ApiError::NotFound("Vessel", _))
    ));
}

#[tokio::test]
async fn test_duplicate_vessel() {
    let controller = build_controller().await;
    controller
        .create_vessel("V1".to_owned(), "Shelf A".to_owned(), None)
        .await
        .unwrap();

    let err = controller
        .create_vessel("V1".to_owned(), "Shelf A".to_owned(), None)
        .await
        .unwrap_err();

    assert_eq!(
        "Internal server error: Unable to create vessel",
        err.to_string()
    );
    assert_eq!(1, controller.vessels().await.unwrap().len());
}

#[tokio::test]
async fn test_unknown_vessel() {
    let controller = build_controller().await;

    assert!(matches!(
        controller.vessel(4711).await,
        Err(ApiError::NotFound("Vessel", 4711))
    ));
    assert!(matches!(
        controller.update_vessel(4711, None, None).await,
        Err(ApiError::NotFound("Vessel", 4711))
    ));
}

#[tokio::test]
async fn test_plant_requires_live_vessel() {
    // Prepare
    let controller = build_controller().await;
    let pot = controller
        .create_vessel("V1".to_owned(), "Shelf A".to_owned(), None)
        .await
        .unwrap();
    let plant = controller
        .create_plant("Basil".to_owned(), "Genovese".to_owned(), pot.id())
        .await
        .unwrap();
    controller.delete_vessel(pot.id()).await.unwrap();

    // Execute
    let create = controller
        .create_plant("Mint".to_owned(), String::new(), pot.id())
        .await;
    let update = controller
        .update_plant(plant.id(), None, None, Some(pot.id()))
        .await;

    // Validate
    assert!(matches!(create, Err(ApiError::NotFound("Vessel", _))));
    assert!(matches!(update, Err(ApiError::NotFound("Vessel", _))));
    assert_eq!(1, controller.plants().await.unwrap().len());
}

#[tokio::test]
async fn test_deleted_plant_stays_updatable() {
    let controller = build_controller().await;
    let pot = controller
        .create_vessel("V1".to_owned(), "Shelf A".to_owned(), None)
        .await
        .unwrap();
    let plant = controller
        .create_plant("Basil".to_owned(), "Genovese".to_owned(), pot.id())
        .await
        .unwrap();
    controller.delete_plant(plant.id()).await.unwrap();

    controller
        .update_plant(plant.id(), None, Some("Thai".to_owned()), None)
        .await
        .unwrap();

    let fetched = controller.plant(plant.id()).await.unwrap();
    assert_eq!("Thai", fetched.description);
    assert!(fetched.deleted.is_some());
    assert!(controller.plants().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_sensor_missing_references() {
    // Prepare
    let controller = build_controller().await;
    let pot = controller
        .create_vessel("V1".to_owned(), "Shelf A".to_owned(), None)
        .await
        .unwrap();
    let category = controller
        .create_sensor_category("Humidity".to_owned(), "Percent".to_owned())
        .await
        .unwrap();

    // Execute
    let no_vessel = controller
        .create_sensor("Probe".to_owned(), 4711, category.id())
        .await;
    let no_category = controller
        .create_sensor("Probe".to_owned(), pot.id(), 4711)
        .await;

    // Validate
    assert!(matches!(no_vessel, Err(ApiError::NotFound("Vessel", 4711))));
    assert!(matches!(
        no_category,
        Err(ApiError::NotFound("Sensor category", 4711))
    ));
    assert!(controller.sensors().await.unwrap().is_empty());
}

async fn build_sensor(controller: &ResourceController) -> i64 {
    let pot = controller
        .create_vessel("V1".to_owned(), "Shelf A".to_owned(), None)
        .await
        .unwrap();
    let category = controller
        .create_sensor_category("Humidity".to_owned(), "Percent".to_owned())
        .await
        .unwrap();
    controller
        .create_sensor("Probe".to_owned(), pot.id(), category.id())
        .await
        .unwrap()
        .id()
}

#[tokio::test]
async fn test_sensor_data_rejects_non_floats() {
    let controller = build_controller().await;
    let sensor_id = build_sensor(&controller).await;

    for value in [json!(1), json!("1.5"), json!(true), json!(null)] {
        let res = controller.create_sensor_data(sensor_id, &value, None).await;
        assert!(
            matches!(res, Err(ApiError::InvalidClientRequest(_))),
            "{} was accepted",
            value
        );
    }
    assert!(controller.sensor_data(sensor_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_sensor_data_created() {
    let controller = build_controller().await;
    let sensor_id = build_sensor(&controller).await;
    let captured = now() - Duration::hours(1);
    let raw = europa_core::timestamp::format(&captured);

    let stored = controller
        .create_sensor_data(sensor_id, &json!(21.5), Some(raw))
        .await
        .unwrap();
    assert_eq!(captured, stored.created);
    assert_eq!(21.5, stored.value);

    let bad = controller
        .create_sensor_data(sensor_id, &json!(21.5), Some("yesterday".to_owned()))
        .await;
    assert!(matches!(bad, Err(ApiError::InvalidClientRequest(_))));
    assert_eq!(1, controller.sensor_data(sensor_id).await.unwrap().len());
}

#[tokio::test]
async fn test_sensor_data_window() {
    // Prepare
    let controller = build_controller().await;
    let sensor_id = build_sensor(&controller).await;
    {
        let mut conn = controller.db_conn.acquire().await.unwrap();
        sensor_data::insert(&mut conn, sensor_id, 1.0, now() - Duration::hours(25))
            .await
            .unwrap();
        sensor_data::insert(&mut conn, sensor_id, 2.0, now() - Duration::hours(2))
            .await
            .unwrap();
    }
    controller
        .create_sensor_data(sensor_id, &json!(3.0), None)
        .await
        .unwrap();

    // Execute
    let data = controller.sensor_data(sensor_id).await.unwrap();

    // Validate
    let values: Vec<f64> = data.iter().map(|d| d.value).collect();
    assert_eq!(vec![2.0, 3.0], values);
}

#[tokio::test]
async fn test_sensor_data_deleted_sensor() {
    let controller = build_controller().await;
    let sensor_id = build_sensor(&controller).await;
    controller.delete_sensor(sensor_id).await.unwrap();

    let res = controller
        .create_sensor_data(sensor_id, &json!(1.5), None)
        .await;

    assert!(matches!(res, Err(ApiError::NotFound("Sensor", _))));
}
