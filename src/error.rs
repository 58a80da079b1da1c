//! Error types for configuration and selection
//!
//! The simulation itself never fails. Errors only arise at the edges: parsing
//! tuning data and handling player selections coming from the UI.

use std::fmt;

/// Top-level error enum for Dino Dash.
#[derive(Debug)]
pub enum GameError {
    /// A difficulty name did not match any known profile.
    UnknownDifficulty {
        /// The rejected name, as received from the UI.
        name: String,
    },

    /// A tuning value is outside its usable range.
    InvalidTuning {
        /// Dotted path of the offending field (e.g. `hard.speed_multiplier`).
        field: String,
        /// Human-readable description of the problem.
        reason: &'static str,
    },

    /// Tuning JSON could not be parsed.
    TuningParse(serde_json::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::UnknownDifficulty { name } => {
                write!(f, "unknown difficulty '{}'", name)
            }
            GameError::InvalidTuning { field, reason } => {
                write!(f, "invalid tuning value '{}': {}", field, reason)
            }
            GameError::TuningParse(err) => write!(f, "failed to parse tuning: {}", err),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::TuningParse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::TuningParse(err)
    }
}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_display_names_offending_value() {
        let err = GameError::UnknownDifficulty {
            name: "nightmare".to_string(),
        };
        assert_eq!(err.to_string(), "unknown difficulty 'nightmare'");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_parse_error_keeps_source() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err = GameError::from(json_err);
        assert!(err.to_string().starts_with("failed to parse tuning"));
        assert!(err.source().is_some());
    }
}
