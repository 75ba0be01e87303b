use std::borrow::Cow;

/// Instance slice error type.
#[dbm_derive::dbm_error]
pub enum InstanceError {
    #[error("Malformed instance payload{}: {source}", format_context(.context))]
    Payload { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Invalid instance{}: {message}", format_context(.context))]
    Invalid { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Instance `{name}` not found{}", format_context(.context))]
    NotFound { name: String, context: Option<Cow<'static, str>> },

    #[error("Instance error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
