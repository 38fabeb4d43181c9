use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use actix_rt::time::sleep;

use watermark_coordinator::domain::snapshot_store::{FileSnapshotStore, START_CLOCK_KEY, SnapshotStore};
use watermark_coordinator::{ClockUpdated, GetLatestMinClock, Shutdown, TaskId, UpdateClock, start_clock_service};

fn temp_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("watermark-{}-{}", uuid::Uuid::new_v4(), name))
}

fn write_inputs() -> (PathBuf, PathBuf) {
    let dag_path = temp_file("dag.json");
    std::fs::write(
        &dag_path,
        r#"{ "taskGroups": [ { "id": "source", "parallelism": 2 }, { "id": "sink", "parallelism": 1 } ] }"#,
    )
    .unwrap();

    let config_path = temp_file("config.json");
    std::fs::write(&config_path, r#"{ "reportIntervalMs": 20, "snapshotIntervalMs": 20 }"#).unwrap();

    (dag_path, config_path)
}

#[actix_rt::test]
async fn test_restart_recovers_from_file() {
    let (dag_path, config_path) = write_inputs();
    let store_path = temp_file("snapshot.json");

    let service = start_clock_service(&dag_path, Some(config_path.as_path()), Arc::new(FileSnapshotStore::new(&store_path))).unwrap();

    let min = service.send(GetLatestMinClock).await.unwrap().unwrap().min_clock;
    assert_eq!(min, 0);

    for (group, index, clock) in [("source", 0, 1_000), ("source", 1, 2_000), ("sink", 0, 1_500)] {
        service.send(UpdateClock::new(TaskId::new(group, index), clock)).await.unwrap().unwrap();
    }
    let reply = service.send(UpdateClock::new(TaskId::new("source", 0), 1_800)).await.unwrap();
    assert_eq!(reply, Ok(ClockUpdated { min_clock: 1_500 }));

    sleep(Duration::from_millis(150)).await;
    service.send(Shutdown).await.unwrap();

    let on_disk = FileSnapshotStore::new(&store_path).get(START_CLOCK_KEY).await.unwrap();
    assert_eq!(on_disk, Some(1_500));

    let restarted =
        start_clock_service(&dag_path, Some(config_path.as_path()), Arc::new(FileSnapshotStore::new(&store_path))).unwrap();
    let min = restarted.send(GetLatestMinClock).await.unwrap().unwrap().min_clock;
    assert_eq!(min, 1_500);

    restarted.send(Shutdown).await.unwrap();
    for path in [dag_path, config_path, store_path] {
        let _ = std::fs::remove_file(path);
    }
}

#[actix_rt::test]
async fn test_invalid_dag_is_rejected_before_start() {
    let dag_path = temp_file("dag.json");
    std::fs::write(&dag_path, r#"{ "taskGroups": [ { "id": "source", "parallelism": 0 } ] }"#).unwrap();

    let result = start_clock_service(&dag_path, None, Arc::new(FileSnapshotStore::new(temp_file("unused.json"))));
    assert!(matches!(result, Err(watermark_coordinator::error::Error::DagConstructionError(_))));

    let _ = std::fs::remove_file(dag_path);
}
