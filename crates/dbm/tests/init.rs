use dbm::store::{Database, DatabaseFind, DatabaseStore, Instance, InstanceStore, PolicyStore};
use dbm::{Engine, ExportKind, MaskingLevel, SLICES, State, WireEnum};
use serde_json::json;

#[test]
fn init_registers_every_slice() {
    let registry = dbm::init().unwrap();

    let names: Vec<_> = registry.slices().map(|s| s.name()).collect();
    assert_eq!(names, SLICES);
    assert!(registry.len() > SLICES.len());
}

#[test]
fn bindings_resolve_to_their_owning_slice() {
    let registry = dbm::init().unwrap();

    let cases = [
        ("Instance", ExportKind::Entity, "instance"),
        ("upsert_instance", ExportKind::Action, "instance"),
        ("find_databases", ExportKind::Selector, "database"),
        ("list_vcs_providers", ExportKind::Selector, "vcs"),
        ("set_masking_level", ExportKind::Action, "policy"),
        ("export_file_extension", ExportKind::Selector, "export"),
    ];
    for (name, kind, slice) in cases {
        let binding = registry.resolve(name).unwrap_or_else(|| panic!("{name} is not bound"));
        assert_eq!(binding.kind, kind, "{name}");
        assert_eq!(binding.slice, slice, "{name}");
    }
    assert!(registry.resolve("load").is_none());
}

#[test]
fn binding_names_are_sorted_and_unique() {
    let registry = dbm::init().unwrap();
    let names = registry.names();

    let mut sorted = names.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(names, sorted);
}

#[test]
fn slices_are_reachable_through_the_registry() {
    let registry = dbm::init().unwrap();

    let instances = registry.slice::<InstanceStore>().unwrap();
    instances
        .upsert_instance_json(&json!({ "name": "instances/prod", "engine": "MYSQL", "state": "ACTIVE" }))
        .unwrap();

    let again = registry.slice::<InstanceStore>().unwrap();
    assert_eq!(again.instances_by_engine(Engine::Mysql).len(), 1);

    let databases = registry.slice::<DatabaseStore>().unwrap();
    databases
        .upsert_database(Database {
            name: "hr".into(),
            instance: "instances/prod".into(),
            engine: Engine::Mysql,
            state: State::Active,
            ..Database::default()
        })
        .unwrap();
    assert_eq!(databases.find_databases(&DatabaseFind::default()).len(), 1);

    let policies = registry.slice::<PolicyStore>().unwrap();
    assert_eq!(policies.masking_level_for("hr", "employee", "ssn"), MaskingLevel::Unspecified);
}

#[test]
fn facade_exposes_the_codec() {
    assert_eq!(Engine::decode("MYSQL"), Engine::Mysql);
    assert_eq!(Engine::encode_ordinal(7), "MONGODB");
    assert_eq!(Engine::decode(&json!(null)), Engine::Unrecognized);

    let instance: Instance = serde_json::from_value(json!({ "name": "i", "engine": 99 })).unwrap();
    assert_eq!(instance.engine.encode(), dbm::UNRECOGNIZED);
}

#[test]
fn databases_of_a_deleted_instance_drop_out_of_unfiltered_finds() {
    let registry = dbm::init().unwrap();
    let instances = registry.slice::<InstanceStore>().unwrap();
    let databases = registry.slice::<DatabaseStore>().unwrap();

    for name in ["instances/old", "instances/new"] {
        instances
            .upsert_instance(Instance { name: name.into(), state: State::Active, ..Instance::default() })
            .unwrap();
    }
    for (instance, state) in [("instances/old", State::Active), ("instances/new", State::Deleted)] {
        databases
            .upsert_database(Database { name: "hr".into(), instance: instance.into(), state, ..Database::default() })
            .unwrap();
    }
    instances.delete_instance("instances/old").unwrap();

    let found = databases.find_databases(&DatabaseFind {
        instance: None,
        live_instances: Some(instances.live_instance_names()),
    });
    let owners: Vec<_> = found.iter().map(|d| d.instance.as_str()).collect();
    assert_eq!(owners, ["instances/new"]);
    assert_eq!(found[0].state, State::Deleted);

    let on_old = databases.find_databases(&DatabaseFind {
        instance: Some("instances/old".into()),
        live_instances: Some(instances.live_instance_names()),
    });
    assert_eq!(on_old.len(), 1);
}
