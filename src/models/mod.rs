pub mod activity;
pub mod admin;
pub mod common;
pub mod emotion;
pub mod emotion_record;
pub mod exercise;
pub mod journal;
pub mod meditation;
pub mod patch;
pub mod phrase;
pub mod report;
pub mod user;

/// Builds a `ValidationError` with a fixed code and message, for the manual
/// `Validate` impls on patch-style update DTOs.
pub(crate) fn field_error(
    code: &'static str,
    message: &'static str,
) -> validator::ValidationError {
    let mut err = validator::ValidationError::new(code);
    err.message = Some(std::borrow::Cow::Borrowed(message));
    err
}
