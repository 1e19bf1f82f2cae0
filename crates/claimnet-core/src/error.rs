use std::fmt;
use std::io;

/// Errors raised while reading or writing a map document.
#[derive(Debug, thiserror::Error)]
pub enum DiagramError {
    /// Reading or writing the map file failed.
    #[error("map file I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file is not valid JSON, or a field has the wrong shape.
    #[error("map file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON parsed but lacks the fields every map file carries.
    #[error("invalid map file format: {0}")]
    InvalidFormat(String),
}

impl DiagramError {
    /// Stable error code for this failure.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Io(_) => ErrorCode::MapFileUnreadable,
            Self::Json(_) | Self::InvalidFormat(_) => ErrorCode::InvalidMapFile,
        }
    }
}

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    InvalidConfigValue,
    MapFileUnreadable,
    InvalidMapFile,
    UnknownMetric,
    ExportWriteFailed,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::InvalidConfigValue => "E1002",
            Self::MapFileUnreadable => "E2001",
            Self::InvalidMapFile => "E2002",
            Self::UnknownMetric => "E3001",
            Self::ExportWriteFailed => "E5001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::InvalidConfigValue => "Config value out of range",
            Self::MapFileUnreadable => "Map file could not be read",
            Self::InvalidMapFile => "Invalid map file format",
            Self::UnknownMetric => "Unknown metric name",
            Self::ExportWriteFailed => "Export write failed",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in claimnet.toml and retry."),
            Self::InvalidConfigValue => {
                Some("damping must be in (0, 1), tolerance > 0, max_iterations >= 1.")
            }
            Self::MapFileUnreadable => Some("Check the path and file permissions."),
            Self::InvalidMapFile => {
                Some("A map file needs a non-empty `theory` plus `nodes` and `edges` arrays.")
            }
            Self::UnknownMetric => Some(
                "Use one of: pagerank, harmonic, reachability, betweenness.",
            ),
            Self::ExportWriteFailed => Some("Check that the output directory exists and is writable."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::{DiagramError, ErrorCode};
    use std::collections::HashSet;

    #[test]
    fn all_codes_are_unique() {
        let all = [
            ErrorCode::ConfigParseError,
            ErrorCode::InvalidConfigValue,
            ErrorCode::MapFileUnreadable,
            ErrorCode::InvalidMapFile,
            ErrorCode::UnknownMetric,
            ErrorCode::ExportWriteFailed,
        ];

        let mut seen = HashSet::new();
        for code in all {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        let code = ErrorCode::InvalidMapFile.code();
        assert_eq!(code.len(), 5);
        assert!(code.starts_with('E'));
        assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn diagram_errors_map_to_codes() {
        let err = DiagramError::InvalidFormat("missing theory".into());
        assert_eq!(err.code(), ErrorCode::InvalidMapFile);
        assert_eq!(err.to_string(), "invalid map file format: missing theory");

        let io = DiagramError::from(std::io::Error::other("boom"));
        assert_eq!(io.code(), ErrorCode::MapFileUnreadable);
    }
}
