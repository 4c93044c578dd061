//! Merge operations through the write repository.

use mimicdb_core::{EntityCell, StoreError};
use mimicdb_repo::{ReadRepository, WriteRepository};
use mimicdb_testkit::fixtures::{Person, Vehicle};
use mimicdb_testkit::shared_store;

#[tokio::test]
async fn merge_new_root_persists_the_whole_graph_once() {
    mimicdb_testkit::init_tracing();
    let store = shared_store();
    let vehicles = WriteRepository::<Vehicle>::new(store.clone());

    // The driver rides along as a passenger too; one shared object, one row.
    let driver = EntityCell::new(Person::new("Gordon Freeman", 27));
    let mut vehicle = Vehicle::new("Pontiac");
    vehicle.driver = Some(driver.clone());
    vehicle.passengers = vec![driver, EntityCell::new(Person::new("Alyx Vance", 24))];
    vehicles.merge(&EntityCell::new(vehicle)).await.unwrap();

    assert_eq!(ReadRepository::<Vehicle>::new(store.clone()).read_all().await.len(), 1);
    let all_people = ReadRepository::<Person>::new(store).read_all().await;
    assert_eq!(all_people.len(), 2);
    assert!(all_people.iter().all(|p| p.id > 0));
    assert!(all_people.iter().all(|p| p.audit.created_at.is_some()));
}

#[tokio::test]
async fn merge_new_root_updates_children_already_stored() {
    let store = shared_store();
    let people = WriteRepository::<Person>::new(store.clone());
    let vehicles = WriteRepository::<Vehicle>::new(store.clone());

    let driver = EntityCell::new(Person::new("Gordon Freeman", 27));
    people.insert(&driver).await.unwrap();
    driver.write().age = 28;

    let mut vehicle = Vehicle::new("Pontiac");
    vehicle.driver = Some(driver);
    vehicles.merge(&EntityCell::new(vehicle)).await.unwrap();

    let all_people = ReadRepository::<Person>::new(store).read_all().await;
    assert_eq!(all_people.len(), 1);
    assert_eq!(all_people[0].age, 28);
}

#[tokio::test]
async fn merge_existing_root_reconciles_the_passenger_list() {
    let store = shared_store();
    let vehicles = WriteRepository::<Vehicle>::new(store.clone());

    let keep = EntityCell::new(Person::new("Gordon Freeman", 27));
    let mut first = Vehicle::new("Pontiac");
    first.passengers = vec![
        keep.clone(),
        EntityCell::new(Person::new("Barney Calhoun", 30)),
    ];
    let first = EntityCell::new(first);
    vehicles.merge(&first).await.unwrap();

    // Same root identity, a rebuilt passenger list: one kept, one dropped,
    // one added.
    let mut second = Vehicle::new("Pontiac");
    second.id = first.read().id;
    second.global_id = first.read().global_id;
    second.audit = first.read().audit.clone();
    second.passengers = vec![keep, EntityCell::new(Person::new("Alyx Vance", 24))];
    vehicles.merge(&EntityCell::new(second)).await.unwrap();

    let names: Vec<String> = ReadRepository::<Person>::new(store)
        .read_all()
        .await
        .iter()
        .map(|p| p.name.clone())
        .collect();
    assert_eq!(names, ["Gordon Freeman", "Alyx Vance"]);
}

#[tokio::test]
async fn merge_existing_root_restamps_only_modified() {
    let store = shared_store();
    let vehicles = WriteRepository::<Vehicle>::new(store.clone());

    let vehicle = EntityCell::new(Vehicle::new("Pontiac"));
    vehicles.merge(&vehicle).await.unwrap();
    let saved = ReadRepository::<Vehicle>::new(store.clone()).read_all().await.remove(0);

    std::thread::sleep(std::time::Duration::from_millis(2));
    vehicle.write().model = "Pontiac GTO".to_string();
    vehicles.merge(&vehicle).await.unwrap();

    let updated = ReadRepository::<Vehicle>::new(store).read_all().await.remove(0);
    assert_eq!(updated.model, "Pontiac GTO");
    assert_eq!(updated.audit.created_at, saved.audit.created_at);
    assert!(updated.audit.modified_at > saved.audit.modified_at);
}

#[tokio::test]
async fn merge_leaf_entity_behaves_like_insert() {
    let store = shared_store();
    let people = WriteRepository::<Person>::new(store.clone());

    let person = EntityCell::new(Person::new("Gordon Freeman", 27));
    people.merge(&person).await.unwrap();

    let all_people = ReadRepository::<Person>::new(store).read_all().await;
    assert_eq!(all_people.len(), 1);
    assert_eq!(all_people[0].id, 1);
}

#[tokio::test]
async fn merge_with_clashing_global_id_fails() {
    let store = shared_store();
    let people = WriteRepository::<Person>::new(store.clone());

    let person = EntityCell::new(Person::new("Gordon Freeman", 27));
    people.insert(&person).await.unwrap();

    let mut clash = Person::new("Barney Calhoun", 30);
    clash.global_id = person.read().global_id;
    clash.id = 40;
    let result = people.merge(&EntityCell::new(clash)).await;

    assert!(matches!(result, Err(StoreError::DuplicateGlobalId { .. })));
}

#[tokio::test]
async fn merge_range_roots_share_already_merged_children() {
    let store = shared_store();
    let vehicles = WriteRepository::<Vehicle>::new(store.clone());

    let shared_driver = EntityCell::new(Person::new("Gordon Freeman", 27));
    let mut first = Vehicle::new("Pontiac");
    first.driver = Some(shared_driver.clone());
    let mut second = Vehicle::new("Mustang");
    second.driver = Some(shared_driver);

    vehicles
        .merge_range(&[EntityCell::new(first), EntityCell::new(second)])
        .await
        .unwrap();

    assert_eq!(ReadRepository::<Vehicle>::new(store.clone()).read_all().await.len(), 2);
    assert_eq!(ReadRepository::<Person>::new(store).read_all().await.len(), 1);
}
