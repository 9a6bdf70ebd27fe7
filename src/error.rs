//! Error types for territory overlay rendering

use std::fmt;

/// Errors that can occur while configuring the overlay or computing a frame
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayError {
    /// Configuration validation failed
    InvalidConfig(String),
    /// An account address did not have the `0x` + 40 characters shape
    InvalidAddress(String),
    /// The address cannot be used as an ally (e.g. it is the viewer itself)
    InvalidAlly(String),
    /// Two sites share the exact same position, so no bisector exists between them
    CoincidentSites {
        /// Index of the first site at the shared position
        first: usize,
        /// Index of the second site at the shared position
        second: usize,
    },
    /// The diagram engine could not tessellate the input
    DiagramFailed(String),
    /// The host could not enumerate map objects
    HostUnavailable(String),
}

impl fmt::Display for OverlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlayError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            OverlayError::InvalidAddress(addr) => write!(f, "invalid account address: {:?}", addr),
            OverlayError::InvalidAlly(msg) => write!(f, "invalid ally: {}", msg),
            OverlayError::CoincidentSites { first, second } => {
                write!(f, "sites {} and {} are coincident", first, second)
            }
            OverlayError::DiagramFailed(msg) => write!(f, "diagram computation failed: {}", msg),
            OverlayError::HostUnavailable(msg) => write!(f, "host unavailable: {}", msg),
        }
    }
}

impl std::error::Error for OverlayError {}

/// Result type alias for overlay operations
pub type Result<T> = std::result::Result<T, OverlayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = OverlayError::CoincidentSites { first: 2, second: 7 };
        assert_eq!(err.to_string(), "sites 2 and 7 are coincident");

        let err = OverlayError::InvalidConfig("border width must be positive".into());
        assert!(err.to_string().starts_with("invalid configuration"));
    }
}
