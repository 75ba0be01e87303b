use dbm_domain::codec::WireEnum;

/// Declared outside `dbm_domain`, the way a slice crate would.
#[dbm_domain::wire_enum]
#[derive(Debug)]
pub enum SyncStatus {
    #[wire(name = "SYNC_STATUS_UNSPECIFIED")]
    Unspecified = 0,
    Ok = 1,
    NotFound = 2,
}

fn main() {
    assert_eq!(SyncStatus::decode("NOT_FOUND"), SyncStatus::NotFound);
    assert_eq!(SyncStatus::decode(9), SyncStatus::Unrecognized);
    assert_eq!(SyncStatus::encode_ordinal(1), "OK");
    let json = serde_json::to_string(&SyncStatus::Ok).unwrap();
    assert_eq!(json, "\"OK\"");
}
