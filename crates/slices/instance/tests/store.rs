use dbm_domain::vocab::{Engine, State};
use dbm_instance::*;
use dbm_kernel::registry::{Export, StoreSlice};
use serde_json::json;

fn instance(name: &str, engine: Engine) -> Instance {
    Instance {
        name: name.into(),
        title: name.to_uppercase(),
        engine,
        state: State::Active,
        external_link: String::new(),
    }
}

#[test]
fn upsert_replaces_by_name() {
    let store = InstanceStore::default();
    store.upsert_instance(instance("instances/prod", Engine::Mysql)).unwrap();
    store.upsert_instance(instance("instances/prod", Engine::Postgres)).unwrap();

    let all = store.list_instances(false);
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].engine, Engine::Postgres);
}

#[test]
fn upsert_requires_a_name() {
    let store = InstanceStore::default();
    let err = store.upsert_instance(instance("  ", Engine::Mysql)).unwrap_err();
    assert!(matches!(err, InstanceError::Invalid { .. }));
}

#[test]
fn json_payload_decodes_enum_fields_leniently() {
    let store = InstanceStore::default();
    let saved = store
        .upsert_instance_json(&json!({
            "name": "instances/legacy",
            "engine": "FUTURE_ENGINE",
            "state": 1,
            "externalLink": "https://console.example.com",
        }))
        .unwrap();

    assert_eq!(saved.engine, Engine::Unrecognized);
    assert_eq!(saved.state, State::Active);
    assert_eq!(saved.external_link, "https://console.example.com");
    assert!(saved.title.is_empty());
}

#[test]
fn json_payload_that_is_not_an_object_is_rejected() {
    let store = InstanceStore::default();
    let err = store.upsert_instance_json(&json!(["instances/prod"])).unwrap_err();
    assert!(matches!(err, InstanceError::Payload { .. }));
    assert!(err.to_string().contains("Decoding instance"));
    assert!(err.to_string().contains("expected an instance object"));
    assert!(store.list_instances(true).is_empty());

    let err = store.upsert_instance_json(&json!(null)).unwrap_err();
    assert!(matches!(err, InstanceError::Payload { .. }));
}

#[test]
fn delete_is_soft_and_restorable() {
    let store = InstanceStore::default();
    store.upsert_instance(instance("instances/a", Engine::Mysql)).unwrap();
    store.upsert_instance(instance("instances/b", Engine::Mysql)).unwrap();

    let deleted = store.delete_instance("instances/a").unwrap();
    assert_eq!(deleted.state, State::Deleted);
    assert_eq!(store.list_instances(false).len(), 1);
    assert_eq!(store.list_instances(true).len(), 2);
    assert_eq!(store.instances_by_engine(Engine::Mysql).len(), 1);

    let live = store.live_instance_names();
    assert!(!live.contains("instances/a"));
    assert!(live.contains("instances/b"));

    store.restore_instance("instances/a").unwrap();
    assert!(store.live_instance_names().contains("instances/a"));
    assert_eq!(store.get_instance("instances/a").unwrap().state, State::Active);
}

#[test]
fn unknown_instance_is_not_found() {
    let store = InstanceStore::default();
    let err = store.delete_instance("instances/missing").unwrap_err();
    assert!(matches!(err, InstanceError::NotFound { ref name, .. } if name == "instances/missing"));
    assert!(store.get_instance("instances/missing").is_none());
}

#[test]
fn listing_is_sorted_and_filtered_by_engine() {
    let store = InstanceStore::default();
    store.upsert_instance(instance("instances/c", Engine::Redis)).unwrap();
    store.upsert_instance(instance("instances/a", Engine::Redis)).unwrap();
    store.upsert_instance(instance("instances/b", Engine::Mongodb)).unwrap();

    let names: Vec<_> = store.list_instances(false).into_iter().map(|i| i.name).collect();
    assert_eq!(names, ["instances/a", "instances/b", "instances/c"]);

    let redis: Vec<_> = store.instances_by_engine(Engine::Redis).into_iter().map(|i| i.name).collect();
    assert_eq!(redis, ["instances/a", "instances/c"]);
}

#[test]
fn writes_back_canonical_names() {
    let value = instance("instances/prod", Engine::Oracle).to_json().unwrap();
    assert_eq!(value["engine"], "ORACLE");
    assert_eq!(value["state"], "ACTIVE");
    assert_eq!(value["externalLink"], "");

    let sentinel = Instance { engine: Engine::Unrecognized, ..Instance::default() };
    assert_eq!(sentinel.to_json().unwrap()["engine"], "UNRECOGNIZED");
}

#[test]
fn exports_every_declared_binding() {
    assert_eq!(InstanceStore::NAME, "instance");
    assert!(InstanceStore::EXPORTS.contains(&Export::entity("Instance")));
    assert!(InstanceStore::EXPORTS.contains(&Export::action("delete_instance")));
    assert!(InstanceStore::EXPORTS.contains(&Export::selector("instances_by_engine")));

    let slice = init().unwrap();
    assert_eq!(slice.name, "instance");
    assert_eq!(slice.state.exports().len(), 9);
}

#[test]
fn clones_share_state() {
    let store = InstanceStore::default();
    let handle = store.clone();
    handle.upsert_instance(instance("instances/shared", Engine::Tidb)).unwrap();
    assert!(store.get_instance("instances/shared").is_some());
}
