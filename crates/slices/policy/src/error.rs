use std::borrow::Cow;

/// Policy slice error type.
#[dbm_derive::dbm_error]
pub enum PolicyError {
    #[error("Malformed masking policy{}: {source}", format_context(.context))]
    Payload { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Invalid masking policy{}: {message}", format_context(.context))]
    Invalid { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
