use std::borrow::Cow;

/// Database slice error type.
#[dbm_derive::dbm_error]
pub enum DatabaseError {
    #[error("Malformed database payload{}: {source}", format_context(.context))]
    Payload { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Invalid database{}: {message}", format_context(.context))]
    Invalid { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Database `{name}` not found on `{instance}`{}", format_context(.context))]
    NotFound { instance: String, name: String, context: Option<Cow<'static, str>> },
}
