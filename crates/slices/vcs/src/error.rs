use std::borrow::Cow;

/// VCS slice error type.
#[dbm_derive::dbm_error]
pub enum VcsError {
    #[error("Malformed VCS provider payload{}: {source}", format_context(.context))]
    Payload { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Invalid VCS provider{}: {message}", format_context(.context))]
    Invalid { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
