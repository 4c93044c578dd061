//! Internal id assignment across repository operations.

use mimicdb_core::EntityCell;
use mimicdb_repo::{ReadRepository, WriteRepository};
use mimicdb_testkit::fixtures::{Person, Vehicle};
use mimicdb_testkit::shared_store;

#[tokio::test]
async fn inserted_entities_count_up_from_one() {
    let store = shared_store();
    let repository = WriteRepository::<Person>::new(store.clone());

    for index in 0..5 {
        let person = EntityCell::new(Person::new(&format!("Person {index}"), 20 + index));
        repository.insert(&person).await.unwrap();
    }

    let ids: Vec<i64> = ReadRepository::<Person>::new(store)
        .read_all()
        .await
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, [1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn assignment_follows_the_last_entry() {
    let store = shared_store();
    let repository = WriteRepository::<Person>::new(store.clone());

    let mut presets = Person::new("Gordon Freeman", 27);
    presets.id = 7;
    repository.insert(&EntityCell::new(presets)).await.unwrap();

    let next = EntityCell::new(Person::new("Alyx Vance", 24));
    repository.insert(&next).await.unwrap();

    assert_eq!(next.read().id, 8);
}

#[tokio::test]
async fn each_partition_counts_independently() {
    let store = shared_store();
    let people = WriteRepository::<Person>::new(store.clone());
    let vehicles = WriteRepository::<Vehicle>::new(store);

    let person = EntityCell::new(Person::new("Gordon Freeman", 27));
    people.insert(&person).await.unwrap();
    let vehicle = EntityCell::new(Vehicle::new("Pontiac"));
    vehicles.insert(&vehicle).await.unwrap();

    assert_eq!(person.read().id, 1);
    assert_eq!(vehicle.read().id, 1);
}

#[tokio::test]
async fn merge_assigns_ids_to_every_new_graph_member() {
    let store = shared_store();
    let vehicles = WriteRepository::<Vehicle>::new(store);

    let driver = EntityCell::new(Person::new("Gordon Freeman", 27));
    let passenger = EntityCell::new(Person::new("Alyx Vance", 24));
    let mut vehicle = Vehicle::new("Pontiac");
    vehicle.driver = Some(driver.clone());
    vehicle.passengers = vec![passenger.clone()];
    let vehicle = EntityCell::new(vehicle);
    vehicles.merge(&vehicle).await.unwrap();

    assert_eq!(vehicle.read().id, 1);
    assert_eq!(driver.read().id, 1);
    assert_eq!(passenger.read().id, 2);
}
