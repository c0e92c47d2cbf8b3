//! Watermark error types.
//!
//! Defines errors that can occur while watermarking a single image.

use std::fmt;

/// Errors that can occur during watermark processing.
///
/// Per-file errors of any kind are caught at the batch walker boundary;
/// only setup errors (unreadable watermark, missing input root) abort a run.
#[derive(Debug, Clone)]
pub enum WatermarkError {
    /// Failed to read or write an image file
    Io(String),

    /// Image data is unsupported or corrupt
    Decode(String),

    /// A computed placement or resize had a degenerate size
    Geometry(String),

    /// Failed to encode the composited result
    Encode { format: String, message: String },
}

impl fmt::Display for WatermarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "I/O error: {}", msg),
            Self::Decode(msg) => write!(f, "Failed to decode image: {}", msg),
            Self::Geometry(msg) => write!(f, "Degenerate watermark geometry: {}", msg),
            Self::Encode { format, message } => {
                write!(f, "Failed to encode to {}: {}", format, message)
            }
        }
    }
}

impl std::error::Error for WatermarkError {}

impl WatermarkError {
    /// Helper constructors for common error patterns
    pub fn io(message: impl Into<String>) -> Self {
        WatermarkError::Io(message.into())
    }

    pub fn decode(message: impl Into<String>) -> Self {
        WatermarkError::Decode(message.into())
    }

    pub fn geometry(message: impl Into<String>) -> Self {
        WatermarkError::Geometry(message.into())
    }

    pub fn encode(format: impl Into<String>, message: impl Into<String>) -> Self {
        WatermarkError::Encode {
            format: format.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WatermarkError::io("permission denied");
        assert_eq!(err.to_string(), "I/O error: permission denied");

        let err = WatermarkError::decode("invalid PNG header");
        assert_eq!(err.to_string(), "Failed to decode image: invalid PNG header");

        let err = WatermarkError::geometry("scaled width is 0");
        assert_eq!(
            err.to_string(),
            "Degenerate watermark geometry: scaled width is 0"
        );

        let err = WatermarkError::encode("jpeg", "encoder error");
        assert_eq!(err.to_string(), "Failed to encode to jpeg: encoder error");
    }

    #[test]
    fn test_error_debug() {
        let err = WatermarkError::decode("test");
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("Decode"));
        assert!(debug_str.contains("test"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<WatermarkError>();
    }
}
