//! Settings store error types.

/// Errors from a persistent settings store.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Reading or writing the backing file failed
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file isn't a JSON object
    #[error("settings JSON error: {message}")]
    Json { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SettingsError::Json {
            message: "expected object".into(),
        };
        assert_eq!(err.to_string(), "settings JSON error: expected object");

        let err = SettingsError::from(std::io::Error::other("disk full"));
        assert_eq!(err.to_string(), "settings I/O error: disk full");
    }
}
