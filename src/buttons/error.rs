use thiserror::Error;

/// Why a descriptor was refused. Both variants are the "invalid descriptor"
/// kind; a duplicate id is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("attempted to register a topic button with no id")]
    MissingId,

    #[error("attempted to register topic button {id} with no icon or title")]
    MissingContent { id: String },
}

impl RegistrationError {
    pub fn is_invalid_descriptor(&self) -> bool {
        matches!(self, Self::MissingId | Self::MissingContent { .. })
    }
}
