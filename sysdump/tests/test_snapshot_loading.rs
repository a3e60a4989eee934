use sysdump::classification::{Capability, SystemCategory, SystemType};
use sysdump::domain::{SnapshotError, SystemHandle, UpdateOrder};
use sysdump::hierarchy::Hierarchy;
use sysdump::world::{SystemRecord, World, WorldSnapshot};

#[test]
fn test_load_fixture() {
    let snapshot = WorldSnapshot::from_file("tests/fixtures/game_world.json").expect("Failed to load fixture");

    assert_eq!(snapshot.name(), "GameWorld");
    assert_eq!(snapshot.types().len(), 13);
    assert_eq!(snapshot.systems().len(), 13);
    assert_eq!(snapshot.type_of_system(SystemHandle(13)).expect("live lookup"), "Spawn<Enemy>");

    let shared = snapshot.record(SystemHandle(16)).expect("Shared is recorded");
    assert_eq!(shared.parents.len(), 2);
    assert_eq!(shared.parents[1].order, UpdateOrder(0));
}

#[test]
fn test_missing_parent_order_defaults_to_zero() {
    let snapshot = WorldSnapshot::from_file("tests/fixtures/stale_world.json").expect("Failed to load fixture");

    let orphan = &snapshot.systems()[1];
    assert_eq!(orphan.parents[0].order, UpdateOrder::default());
    assert!(orphan.type_name.is_none());
    assert!(orphan.runtime_type.is_none());
}

#[test]
fn test_fixture_classification() {
    let snapshot = WorldSnapshot::from_file("tests/fixtures/game_world.json").expect("Failed to load fixture");
    let hierarchy = Hierarchy::build(&snapshot, snapshot.discover()).expect("Failed to build hierarchy");

    let category = |handle: u64| {
        let index = hierarchy.find_by_handle(SystemHandle(handle)).expect("handle is present");
        hierarchy.node(index).category
    };

    assert_eq!(category(10), SystemCategory::Group);
    assert_eq!(category(12), SystemCategory::Base);
    assert_eq!(category(14), SystemCategory::Unmanaged);
    assert_eq!(category(13), SystemCategory::Unknown);
    assert_eq!(hierarchy.counts().total(), 13);
}

#[test]
fn test_snapshot_file_roundtrip() {
    let snapshot = WorldSnapshot::new("Saved")
        .with_type(SystemType::new("Sim", [Capability::Group, Capability::Managed]))
        .with_type(SystemType::generic("Spawn<T>", [Capability::Managed]))
        .with_system(SystemRecord::new(1, "Sim"))
        .with_system(SystemRecord::untyped(2, Some("Spawn<Enemy>".to_string())).with_parent(1, 3));

    let file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let json = serde_json::to_string_pretty(&snapshot).expect("Failed to serialize snapshot");
    std::fs::write(file.path(), json).expect("Failed to write snapshot");

    let loaded = WorldSnapshot::from_file(file.path()).expect("Failed to reload snapshot");
    assert_eq!(loaded, snapshot);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let result = WorldSnapshot::from_file(dir.path().join("absent.json"));
    assert!(matches!(result, Err(SnapshotError::Io(_))));
}

#[test]
fn test_unknown_capability_is_json_error() {
    let json = r#"{ "name": "W", "types": [{ "name": "A", "capabilities": ["scheduled"] }] }"#;
    assert!(matches!(WorldSnapshot::from_json(json), Err(SnapshotError::Json(_))));
}
