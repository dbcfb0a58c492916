use thiserror::Error;

/// Errors raised while computing a proposal
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Consumption of {consumption_kwh} kWh/month sizes to zero panels")]
    SystemTooSmall { consumption_kwh: f64 },
    #[error("Not computable: {0}")]
    NotComputable(String),
    #[error("No inverter available for {0}")]
    EmptyInverterCatalog(String),
    #[error("Invalid constants: {0}")]
    InvalidConstants(String),
}

impl EngineError {
    /// Whether the error was caused by the caller's input rather than the
    /// engine's own configuration.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidInput(_) | EngineError::SystemTooSmall { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::SystemTooSmall { consumption_kwh: 12.0 };
        assert_eq!(err.to_string(), "Consumption of 12 kWh/month sizes to zero panels");
        assert!(err.is_client_error());
        assert!(!EngineError::EmptyInverterCatalog("three_phase".into()).is_client_error());
    }
}
