use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] assetlens_core::ValidationError),

    #[error("command error: {0}")]
    Command(String),

    #[error("strict mode failed: warnings={warning_count}")]
    StrictModeViolation { warning_count: usize },

    #[error(transparent)]
    Analysis(#[from] assetlens_core::AnalysisError),

    #[error(transparent)]
    History(#[from] assetlens_core::HistoryError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Command(_) => 2,
            Self::StrictModeViolation { .. } => 5,
            Self::Serialization(_) => 4,
            Self::Analysis(_) => 6,
            Self::History(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_categories() {
        let timeout = CliError::from(assetlens_core::AnalysisError::Timeout {
            symbol: String::from("AAPL"),
            timeout_ms: 10,
        });
        assert_eq!(timeout.exit_code(), 6);
        assert_eq!(CliError::StrictModeViolation { warning_count: 1 }.exit_code(), 5);
        assert_eq!(CliError::Command(String::from("bad")).exit_code(), 2);
        let corrupt = CliError::from(assetlens_core::HistoryError::Serialization(
            serde_json::from_str::<u8>("x").expect_err("not a number"),
        ));
        assert_eq!(corrupt.exit_code(), 10);
    }
}
