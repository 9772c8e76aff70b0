/// Domain-level error raised by the validation rules in this crate.
///
/// Transport, authorization, and rejection failures belong to the
/// client and console layers; the pure domain only ever rejects
/// invalid input.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
}
