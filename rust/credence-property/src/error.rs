/// Errors raised when declaring a malformed property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PropertyError {
    /// `allow_any` was asserted together with a non-empty explicit value set.
    #[error("allow-any property must not carry explicit allowed values")]
    InvalidValueCondition,

    /// Neither `allow_any`, a shape, nor any explicit value was provided.
    #[error("property without allow-any must carry allowed values or a shape")]
    EmptyAllowedValuesWithoutAllowAny,
}
