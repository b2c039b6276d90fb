/// Integration tests for the controller and the dispatcher
///
/// Each test runs against a fresh SQLite file in a temporary directory.
/// Run with: cargo test -p roster-worker

use roster_shared::db::pool::DatabaseConfig;
use roster_shared::error::StoreError;
use roster_shared::models::record::{NewRecord, Record};
use roster_shared::store::Store;
use roster_worker::command::{Command, Outcome};
use roster_worker::controller::Controller;
use roster_worker::dispatcher::{DispatchError, Dispatcher};
use tempfile::TempDir;

async fn open_store(dir: &TempDir) -> Store {
    Store::open(DatabaseConfig::for_path(dir.path().join("roster.db")))
        .await
        .expect("Failed to open store")
}

fn person(name: &str, email: &str, city: &str) -> NewRecord {
    NewRecord::new(name, email).city(city)
}

fn names(outcome: Outcome) -> Vec<String> {
    match outcome {
        Outcome::Records(records) => records.into_iter().map(|r| r.name).collect(),
        other => panic!("expected records, got {:?}", other),
    }
}

async fn seeded_controller(dir: &TempDir) -> Controller {
    let mut controller = Controller::new(open_store(dir).await);
    for (name, email, city) in [
        ("Ana", "a@x.com", "Lima"),
        ("Bob", "b@x.com", "Lima"),
        ("Carol", "c@x.com", "Miami"),
    ] {
        controller
            .dispatch(Command::CreateRecord(person(name, email, city)))
            .await
            .unwrap();
    }
    controller
}

#[tokio::test]
async fn test_create_returns_id_and_reloads_session() {
    let dir = TempDir::new().unwrap();
    let mut controller = Controller::new(open_store(&dir).await);
    assert!(!controller.session().is_loaded());

    let outcome = controller
        .dispatch(Command::CreateRecord(person("Ana", "a@x.com", "Lima")))
        .await
        .unwrap();

    let id = match outcome {
        Outcome::Created(id) => id,
        other => panic!("expected Created, got {:?}", other),
    };
    assert!(id > 0);
    assert_eq!(controller.session().result_count(), 1);
    assert_eq!(controller.session().all()[0].id, id);
}

#[tokio::test]
async fn test_filter_commands_use_loaded_set_without_chaining() {
    let dir = TempDir::new().unwrap();
    let mut controller = seeded_controller(&dir).await;

    let hits = controller
        .dispatch(Command::FilterQuery("lima".to_string()))
        .await
        .unwrap();
    assert_eq!(names(hits), vec!["Ana", "Bob"]);

    // Starts again from the full set, not from the previous result
    let hits = controller
        .dispatch(Command::CityQuery("mia".to_string()))
        .await
        .unwrap();
    assert_eq!(names(hits), vec!["Carol"]);

    let all = controller.dispatch(Command::ResetFilter).await.unwrap();
    assert_eq!(names(all), vec!["Ana", "Bob", "Carol"]);
}

#[tokio::test]
async fn test_short_city_query_shows_full_set() {
    let dir = TempDir::new().unwrap();
    let mut controller = seeded_controller(&dir).await;

    controller
        .dispatch(Command::FilterQuery("carol".to_string()))
        .await
        .unwrap();

    let hits = controller
        .dispatch(Command::CityQuery("L".to_string()))
        .await
        .unwrap();
    assert_eq!(names(hits), vec!["Ana", "Bob", "Carol"]);
}

#[tokio::test]
async fn test_filter_before_load_reads_store_once() {
    let dir = TempDir::new().unwrap();

    let store = open_store(&dir).await;
    store.create(person("Ana", "a@x.com", "Lima")).await.unwrap();

    let mut controller = Controller::new(store);
    let hits = controller
        .dispatch(Command::FilterQuery("ana".to_string()))
        .await
        .unwrap();

    assert_eq!(names(hits), vec!["Ana"]);
    assert!(controller.session().is_loaded());
}

#[tokio::test]
async fn test_city_suggestions_follow_writes() {
    let dir = TempDir::new().unwrap();
    let mut controller = seeded_controller(&dir).await;

    let cities = controller.dispatch(Command::CitySuggestions).await.unwrap();
    assert_eq!(
        cities,
        Outcome::Cities(vec!["Lima".to_string(), "Miami".to_string()])
    );

    controller
        .dispatch(Command::CreateRecord(person("Dan", "d@x.com", "Quito")))
        .await
        .unwrap();

    let cities = controller.dispatch(Command::CitySuggestions).await.unwrap();
    assert_eq!(
        cities,
        Outcome::Cities(vec![
            "Lima".to_string(),
            "Miami".to_string(),
            "Quito".to_string()
        ])
    );
}

#[tokio::test]
async fn test_update_and_delete_refresh_session() {
    let dir = TempDir::new().unwrap();
    let mut controller = seeded_controller(&dir).await;

    let ana: Record = controller.session().all()[0].clone();
    let moved = Record {
        city: Some("Quito".to_string()),
        ..ana.clone()
    };
    assert_eq!(
        controller.dispatch(Command::UpdateRecord(moved)).await.unwrap(),
        Outcome::Updated(ana.id)
    );
    assert_eq!(
        names(controller.dispatch(Command::FilterQuery("quito".to_string())).await.unwrap()),
        vec!["Ana"]
    );

    assert_eq!(
        controller.dispatch(Command::DeleteRecord(ana.id)).await.unwrap(),
        Outcome::Deleted(ana.id)
    );
    assert_eq!(controller.session().all().len(), 2);
    assert_eq!(controller.dispatch(Command::Count).await.unwrap(), Outcome::Count(2));
}

#[tokio::test]
async fn test_failed_write_leaves_session_untouched() {
    let dir = TempDir::new().unwrap();
    let mut controller = seeded_controller(&dir).await;
    let before = controller.session().all().to_vec();

    let result = controller
        .dispatch(Command::CreateRecord(person("Other", "a@x.com", "Lima")))
        .await;
    assert!(matches!(result, Err(StoreError::ConstraintViolation(_))));

    let result = controller.dispatch(Command::DeleteRecord(999)).await;
    assert!(matches!(result, Err(StoreError::NotFound(999))));

    assert_eq!(controller.session().all(), before.as_slice());
}

#[tokio::test]
async fn test_load_by_id_and_store_search() {
    let dir = TempDir::new().unwrap();
    let mut controller = seeded_controller(&dir).await;

    let id = controller.session().all()[2].id;
    match controller.dispatch(Command::LoadById(id)).await.unwrap() {
        Outcome::Record(record) => assert_eq!(record.name, "Carol"),
        other => panic!("expected Record, got {:?}", other),
    }

    let hits = controller
        .dispatch(Command::SearchByName("O".to_string()))
        .await
        .unwrap();
    assert_eq!(names(hits), vec!["Bob", "Carol"]);
}

#[tokio::test]
async fn test_dispatcher_processes_commands_in_order() {
    let dir = TempDir::new().unwrap();
    let dispatcher = Dispatcher::spawn(Controller::new(open_store(&dir).await));
    let handle = dispatcher.handle();

    let mut ids = Vec::new();
    for i in 0..5 {
        let outcome = handle
            .send(Command::CreateRecord(NewRecord::new(
                format!("User {}", i),
                format!("u{}@x.com", i),
            )))
            .await
            .unwrap();
        match outcome {
            Outcome::Created(id) => ids.push(id),
            other => panic!("expected Created, got {:?}", other),
        }
    }

    assert!(ids.windows(2).all(|w| w[0] < w[1]), "ids out of order: {:?}", ids);
    assert_eq!(handle.send(Command::Count).await.unwrap(), Outcome::Count(5));

    let controller = dispatcher.shutdown().await.expect("task should not panic");
    assert_eq!(controller.session().all().len(), 5);
}

#[tokio::test]
async fn test_concurrent_handles_share_one_writer() {
    let dir = TempDir::new().unwrap();
    let dispatcher = Dispatcher::spawn(Controller::new(open_store(&dir).await));

    let mut tasks = Vec::new();
    for i in 0..10 {
        let handle = dispatcher.handle();
        tasks.push(tokio::spawn(async move {
            handle
                .send(Command::CreateRecord(NewRecord::new(
                    format!("User {}", i),
                    format!("u{}@x.com", i),
                )))
                .await
        }));
    }
    for task in tasks {
        assert!(matches!(task.await.unwrap(), Ok(Outcome::Created(_))));
    }

    let handle = dispatcher.handle();
    assert_eq!(handle.send(Command::Count).await.unwrap(), Outcome::Count(10));
    dispatcher.shutdown().await;
}

#[tokio::test]
async fn test_store_errors_come_back_through_handle() {
    let dir = TempDir::new().unwrap();
    let dispatcher = Dispatcher::spawn(Controller::new(open_store(&dir).await));
    let handle = dispatcher.handle();

    let result = handle.send(Command::LoadById(42)).await;
    assert!(matches!(
        result,
        Err(DispatchError::Store(StoreError::NotFound(42)))
    ));

    dispatcher.shutdown().await;
}

#[tokio::test]
async fn test_send_after_shutdown_is_closed() {
    let dir = TempDir::new().unwrap();
    let dispatcher = Dispatcher::spawn(Controller::new(open_store(&dir).await));
    let handle = dispatcher.handle();

    let controller = dispatcher.shutdown().await.expect("task should not panic");
    controller.into_store().close().await;

    assert!(handle.is_closed());
    let result = handle.send(Command::Count).await;
    assert!(matches!(result, Err(DispatchError::Closed)));
}
