use chrono::{Duration, Utc};

use super::plant;
use super::sensor;
use super::sensor_category;
use super::sensor_data;
use super::vessel::{self, VesselSize};
use super::*;

fn now() -> chrono::NaiveDateTime {
    europa_core::timestamp::truncate(Utc::now().naive_utc())
}

#[tokio::test]
async fn test_db_connection() {
    let conn = connect_test_db().await;
    check_schema(&conn).await.unwrap();
}

#[tokio::test]
async fn crud_vessels() {
    let pool = connect_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    // create
    let dao = vessel::insert(&mut conn, "V1", VesselSize::PotTwelveCm, "Shelf A", now())
        .await
        .unwrap();
    assert_eq!("V1", dao.name());
    assert_eq!("POT_TWELVE_CM", dao.size);
    assert_eq!(None, dao.deleted());

    // read
    assert_eq!(vec![dao.clone()], vessel::read(&mut conn).await.unwrap());

    // update
    vessel::update(&mut conn, dao.id(), None, Some("Shelf B"))
        .await
        .unwrap();
    let updated = vessel::get(&mut conn, dao.id()).await.unwrap().unwrap();
    assert_eq!("V1", updated.name());
    assert_eq!("Shelf B", updated.location());

    // delete
    vessel::mark_deleted(&mut conn, dao.id(), now()).await.unwrap();
    assert!(vessel::read(&mut conn).await.unwrap().is_empty());
    assert!(vessel::get_active(&mut conn, dao.id())
        .await
        .unwrap()
        .is_none());
    assert!(vessel::get(&mut conn, dao.id())
        .await
        .unwrap()
        .unwrap()
        .deleted()
        .is_some());
}

#[tokio::test]
async fn vessel_name_location_is_unique() {
    let pool = connect_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    vessel::insert(&mut conn, "V1", VesselSize::PotTwelveCm, "Shelf A", now())
        .await
        .unwrap();
    vessel::insert(&mut conn, "V1", VesselSize::PotTwelveCm, "Shelf B", now())
        .await
        .unwrap();
    let res = vessel::insert(&mut conn, "V1", VesselSize::PotTwelveCm, "Shelf A", now()).await;

    assert!(res.is_err());
    assert_eq!(2, vessel::read(&mut conn).await.unwrap().len());
}

#[tokio::test]
async fn crud_plants() {
    let pool = connect_test_db().await;
    let mut conn = pool.acquire().await.unwrap();
    let pot = vessel::insert(&mut conn, "V1", VesselSize::PotTwelveCm, "Shelf A", now())
        .await
        .unwrap();
    let other_pot = vessel::insert(&mut conn, "V2", VesselSize::PotTwelveCm, "Shelf A", now())
        .await
        .unwrap();

    // create
    let dao = plant::insert(&mut conn, "Basil", "Genovese", pot.id(), now())
        .await
        .unwrap();
    assert_eq!(pot.id(), dao.vessel_id());

    // same name in the same vessel collides
    assert!(plant::insert(&mut conn, "Basil", "Thai", pot.id(), now())
        .await
        .is_err());
    // unknown vessel violates the foreign key
    assert!(plant::insert(&mut conn, "Mint", "", 4711, now())
        .await
        .is_err());

    // update
    plant::update(&mut conn, dao.id(), None, Some("Sweet"), Some(other_pot.id()))
        .await
        .unwrap();
    let updated = plant::get(&mut conn, dao.id()).await.unwrap().unwrap();
    assert_eq!("Basil", updated.name);
    assert_eq!("Sweet", updated.description);
    assert_eq!(other_pot.id(), updated.vessel_id());

    // delete
    plant::mark_deleted(&mut conn, dao.id(), now()).await.unwrap();
    assert!(plant::read(&mut conn).await.unwrap().is_empty());
    assert!(plant::get_active(&mut conn, dao.id()).await.unwrap().is_none());
}

#[tokio::test]
async fn crud_sensor_categories_and_sensors() {
    let pool = connect_test_db().await;
    let mut conn = pool.acquire().await.unwrap();
    let pot = vessel::insert(&mut conn, "V1", VesselSize::PotTwelveCm, "Shelf A", now())
        .await
        .unwrap();

    let category = sensor_category::insert(&mut conn, "Soil Moisture", "Boolean", now())
        .await
        .unwrap();
    let dao = sensor::insert(&mut conn, "Probe", category.id(), pot.id(), now())
        .await
        .unwrap();
    assert_eq!(category.id(), dao.category_id);

    let heat = sensor_category::insert(&mut conn, "Soil Temperature", "Degrees", now())
        .await
        .unwrap();
    sensor::update(&mut conn, dao.id(), Some("Thermometer"), Some(heat.id()), None)
        .await
        .unwrap();
    let updated = sensor::get(&mut conn, dao.id()).await.unwrap().unwrap();
    assert_eq!("Thermometer", updated.name);
    assert_eq!(heat.id(), updated.category_id);
    assert_eq!(pot.id(), updated.vessel_id);

    sensor_category::update(&mut conn, category.id(), None, Some("Percent"))
        .await
        .unwrap();
    let category = sensor_category::get(&mut conn, category.id())
        .await
        .unwrap()
        .unwrap();
    assert_eq!("Percent", category.units);

    sensor::mark_deleted(&mut conn, dao.id(), now()).await.unwrap();
    sensor_category::mark_deleted(&mut conn, heat.id(), now())
        .await
        .unwrap();
    assert!(sensor::read(&mut conn).await.unwrap().is_empty());
    assert_eq!(1, sensor_category::read(&mut conn).await.unwrap().len());
}

#[tokio::test]
async fn sensor_data_window() {
    let pool = connect_test_db().await;
    let mut conn = pool.acquire().await.unwrap();
    let pot = vessel::insert(&mut conn, "V1", VesselSize::PotTwelveCm, "Shelf A", now())
        .await
        .unwrap();
    let category = sensor_category::insert(&mut conn, "Humidity", "Percent", now())
        .await
        .unwrap();
    let probe = sensor::insert(&mut conn, "Probe", category.id(), pot.id(), now())
        .await
        .unwrap();
    let neighbour = sensor::insert(&mut conn, "Neighbour", category.id(), pot.id(), now())
        .await
        .unwrap();

    let stale = now() - Duration::hours(25);
    let recent = now() - Duration::hours(23);
    sensor_data::insert(&mut conn, probe.id(), 1.5, stale)
        .await
        .unwrap();
    let kept = sensor_data::insert(&mut conn, probe.id(), 2.5, recent)
        .await
        .unwrap();
    sensor_data::insert(&mut conn, neighbour.id(), 3.5, recent)
        .await
        .unwrap();

    let since = now() - Duration::hours(24);
    let rows = sensor_data::get_since(&mut conn, probe.id(), since)
        .await
        .unwrap();
    assert_eq!(vec![kept], rows);

    // a soft deleted sensor hides its readings
    sensor::mark_deleted(&mut conn, probe.id(), now()).await.unwrap();
    assert!(sensor_data::get_since(&mut conn, probe.id(), since)
        .await
        .unwrap()
        .is_empty());
}
