use std::borrow::Cow;

/// Export slice error type.
#[dbm_derive::dbm_error]
pub enum ExportError {
    #[error("Malformed export request{}: {source}", format_context(.context))]
    Payload { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Invalid export request{}: {message}", format_context(.context))]
    Invalid { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
