use dbm_domain::vocab::VcsType;
use dbm_vcs::*;
use serde_json::json;

#[test]
fn type_field_uses_the_wire_name() {
    let store = VcsStore::default();
    let saved = store
        .upsert_vcs_provider_json(&json!({
            "name": "vcsProviders/gitlab",
            "title": "GitLab",
            "type": "GITLAB",
            "url": "https://gitlab.example.com",
        }))
        .unwrap();

    assert_eq!(saved.vcs_type, VcsType::Gitlab);
    let written = saved.to_json().unwrap();
    assert_eq!(written["type"], "GITLAB");
    assert!(written.get("vcsType").is_none());
}

#[test]
fn numeric_and_unknown_types() {
    let by_ordinal = VcsProvider::from_json(&json!({ "name": "p", "type": 4 })).unwrap();
    assert_eq!(by_ordinal.vcs_type, VcsType::AzureDevops);

    let unknown = VcsProvider::from_json(&json!({ "name": "p", "type": "GITEA" })).unwrap();
    assert_eq!(unknown.vcs_type, VcsType::Unrecognized);
    assert_eq!(unknown.to_json().unwrap()["type"], "UNRECOGNIZED");

    let missing = VcsProvider::from_json(&json!({ "name": "p" })).unwrap();
    assert_eq!(missing.vcs_type, VcsType::Unspecified);
}

#[test]
fn non_object_payload_is_rejected() {
    let store = VcsStore::default();
    let err = store.upsert_vcs_provider_json(&json!("GITHUB")).unwrap_err();
    assert!(matches!(err, VcsError::Payload { .. }));

    let err = store.upsert_vcs_provider_json(&json!(["vcsProviders/github", "GitHub", "GITHUB"])).unwrap_err();
    assert!(matches!(err, VcsError::Payload { .. }));
    assert!(err.to_string().contains("expected a VCS provider object"));
    assert!(store.list_vcs_providers().is_empty());
}

#[test]
fn providers_are_listed_by_name() {
    let store = VcsStore::default();
    for name in ["vcsProviders/z", "vcsProviders/a"] {
        store
            .upsert_vcs_provider(VcsProvider { name: name.into(), ..VcsProvider::default() })
            .unwrap();
    }

    let names: Vec<_> = store.list_vcs_providers().into_iter().map(|p| p.name).collect();
    assert_eq!(names, ["vcsProviders/a", "vcsProviders/z"]);
    assert!(store.get_vcs_provider("vcsProviders/a").is_some());
    assert!(store.upsert_vcs_provider(VcsProvider::default()).is_err());
}

#[test]
fn init_registers_the_slice() {
    assert_eq!(init().unwrap().name, "vcs");
}
