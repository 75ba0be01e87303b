//! Enumerated vocabularies of the `v1` protocol.
//!
//! Ordinals are assigned once and never reused or renumbered: wire compatibility
//! depends on numeric stability. New members take the next unused ordinal.

use crate::codec::{WireEnum, WireValue};
use crate::wire_enum;

/// Lifecycle state of a resource.
#[wire_enum]
pub enum State {
    #[wire(name = "STATE_UNSPECIFIED")]
    Unspecified = 0,
    Active = 1,
    Deleted = 2,
}

/// Database engine identity.
#[wire_enum]
pub enum Engine {
    #[wire(name = "ENGINE_UNSPECIFIED")]
    Unspecified = 0,
    Clickhouse = 1,
    Mysql = 2,
    Postgres = 3,
    Snowflake = 4,
    Sqlite = 5,
    Tidb = 6,
    Mongodb = 7,
    Redis = 8,
    Oracle = 9,
    Spanner = 10,
    Mssql = 11,
    Redshift = 12,
    Mariadb = 13,
    Oceanbase = 14,
    Dm = 15,
    Risingwave = 16,
    OceanbaseOracle = 17,
    Starrocks = 18,
    Doris = 19,
    Hive = 20,
}

/// Version-control provider.
#[wire_enum]
pub enum VcsType {
    #[wire(name = "VCS_TYPE_UNSPECIFIED")]
    Unspecified = 0,
    /// GitHub community edition.
    Github = 1,
    /// GitLab community and enterprise editions.
    Gitlab = 2,
    /// Bitbucket cloud or Bitbucket server.
    Bitbucket = 3,
    /// Azure DevOps GitOps workflow.
    AzureDevops = 4,
}

/// How much of a sensitive column is hidden from readers.
#[wire_enum]
pub enum MaskingLevel {
    #[wire(name = "MASKING_LEVEL_UNSPECIFIED")]
    Unspecified = 0,
    None = 1,
    Partial = 2,
    Full = 3,
}

/// File format of a query result export.
#[wire_enum]
pub enum ExportFormat {
    #[wire(name = "FORMAT_UNSPECIFIED")]
    Unspecified = 0,
    Csv = 1,
    Json = 2,
    Sql = 3,
    Xlsx = 4,
}

/// Runtime handle on one of the vocabularies, for tools that pick the vocabulary by key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vocabulary {
    State,
    Engine,
    VcsType,
    MaskingLevel,
    ExportFormat,
}

impl Vocabulary {
    pub const ALL: [Self; 5] =
        [Self::State, Self::Engine, Self::VcsType, Self::MaskingLevel, Self::ExportFormat];

    /// Lookup key, e.g. `"vcs_type"`.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::State => "state",
            Self::Engine => "engine",
            Self::VcsType => "vcs_type",
            Self::MaskingLevel => "masking_level",
            Self::ExportFormat => "export_format",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.key() == key)
    }

    /// Decodes `input` and returns the resulting `(ordinal, name)` pair.
    #[must_use]
    pub fn decode<'a>(self, input: impl Into<WireValue<'a>>) -> (i32, &'static str) {
        fn resolve<T: WireEnum>(input: WireValue<'_>) -> (i32, &'static str) {
            let value = T::decode(input);
            (value.ordinal(), value.name())
        }

        let input = input.into();
        match self {
            Self::State => resolve::<State>(input),
            Self::Engine => resolve::<Engine>(input),
            Self::VcsType => resolve::<VcsType>(input),
            Self::MaskingLevel => resolve::<MaskingLevel>(input),
            Self::ExportFormat => resolve::<ExportFormat>(input),
        }
    }

    #[must_use]
    pub fn encode(self, ordinal: i32) -> &'static str {
        match self {
            Self::State => State::encode_ordinal(ordinal),
            Self::Engine => Engine::encode_ordinal(ordinal),
            Self::VcsType => VcsType::encode_ordinal(ordinal),
            Self::MaskingLevel => MaskingLevel::encode_ordinal(ordinal),
            Self::ExportFormat => ExportFormat::encode_ordinal(ordinal),
        }
    }

    #[must_use]
    pub fn table(self) -> Vec<(i32, &'static str)> {
        match self {
            Self::State => State::table(),
            Self::Engine => Engine::table(),
            Self::VcsType => VcsType::table(),
            Self::MaskingLevel => MaskingLevel::table(),
            Self::ExportFormat => ExportFormat::table(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for vocabulary in Vocabulary::ALL {
            assert_eq!(Vocabulary::from_key(vocabulary.key()), Some(vocabulary));
        }
        assert_eq!(Vocabulary::from_key("Engine"), None);
    }

    #[test]
    fn runtime_decode_matches_typed_decode() {
        assert_eq!(Vocabulary::Engine.decode("HIVE"), (20, "HIVE"));
        assert_eq!(Vocabulary::VcsType.decode(4), (4, "AZURE_DEVOPS"));
        assert_eq!(Vocabulary::MaskingLevel.decode(None::<&str>), (-1, "UNRECOGNIZED"));
        assert_eq!(Vocabulary::ExportFormat.encode(0), "FORMAT_UNSPECIFIED");
    }

    #[test]
    fn tables_list_sentinel_then_members() {
        let table = Vocabulary::State.table();
        assert_eq!(
            table,
            vec![(-1, "UNRECOGNIZED"), (0, "STATE_UNSPECIFIED"), (1, "ACTIVE"), (2, "DELETED")]
        );
        assert_eq!(Vocabulary::Engine.table().len(), 22);
    }
}
