use parkade::domain::slot::SlotCategory;
use parkade::domain::vehicle::{Vehicle, VehicleCategory};
use parkade::error::ParkingError;
use parkade::infrastructure::settlement::CashSettler;
use std::collections::HashSet;
use std::sync::Arc;

mod common;
use common::slot;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_parks_never_share_a_slot() {
    let slots = (1..=10)
        .map(|i| slot(&format!("F1-C{i:03}"), SlotCategory::Car, 1, false))
        .collect();
    let (facility, _) = common::facility_with(slots);
    let facility = Arc::new(facility);

    let handles: Vec<_> = (0..25)
        .map(|i| {
            let facility = Arc::clone(&facility);
            tokio::spawn(async move {
                facility
                    .park(Vehicle::new(format!("CAR{i:02}"), VehicleCategory::Car))
                    .await
            })
        })
        .collect();

    let mut used = HashSet::new();
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(stay) => assert!(used.insert(stay.slot), "slot handed out twice"),
            Err(ParkingError::Capacity { .. }) => rejected += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(used.len(), 10);
    assert_eq!(rejected, 15);
    let snapshot = facility.availability_snapshot().await;
    assert_eq!(snapshot.category(SlotCategory::Car).available, 0);
    assert_eq!(snapshot.active_stays, 10);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_exits_settle_each_stay_once() {
    let slots = (1..=8)
        .map(|i| slot(&format!("F1-M{i:03}"), SlotCategory::Motorcycle, 1, false))
        .collect();
    let (facility, _) = common::facility_with(slots);
    let facility = Arc::new(facility);

    let mut ids = Vec::new();
    for i in 0..8 {
        let stay = facility
            .park(Vehicle::new(format!("BIKE{i}"), VehicleCategory::Motorcycle))
            .await
            .unwrap();
        ids.push(stay.id);
    }

    // Every stay is exited twice; only one of each pair can succeed.
    let handles: Vec<_> = ids
        .iter()
        .chain(ids.iter())
        .map(|id| {
            let facility = Arc::clone(&facility);
            let id = *id;
            tokio::spawn(async move { facility.exit(id, &CashSettler).await })
        })
        .collect();

    let mut paid = 0;
    let mut unknown = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => paid += 1,
            Err(ParkingError::UnknownStay(_)) => unknown += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(paid, 8);
    assert_eq!(unknown, 8);
    assert!(facility.active_stays().await.is_empty());
}
