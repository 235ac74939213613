use thiserror::Error;

/// Opaque identifier for a native overlay window. Issued by the platform on
/// creation and only ever handed back to it for destruction.
pub type SurfaceHandle = u64;

/// Overlay permission as the platform reports it right now. Never cached:
/// the user can grant or revoke the permission externally at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    /// The platform cannot answer without prompting the user.
    Unknown,
    Granted,
    Denied,
}

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("platform refused the overlay window: {0}")]
    Refused(String),
    #[error("unknown platform failure")]
    Unknown,
}

impl From<&str> for PlatformError {
    fn from(error: &str) -> Self {
        PlatformError::Refused(error.to_string())
    }
}

impl From<String> for PlatformError {
    fn from(error: String) -> Self {
        PlatformError::Refused(error)
    }
}

pub type PlatformResult<T> = Result<T, PlatformError>;
