use serde::{Deserialize, Serialize};

/// Inputs the engine refuses to compute with. No partial result is ever
/// produced alongside one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApportionError {
    #[error("invalid input: seat count must be >= 0, got {0}")]
    NegativeSeats(i64),
    #[error("invalid input: total valid votes must be >= 0, got {0}")]
    NegativeTotal(i64),
    #[error("invalid input: votes for party '{party}' must be >= 0, got {votes}")]
    NegativeVotes { party: String, votes: i64 },
    #[error("invalid input: quota must be > 0")]
    ZeroQuota,
    #[error("invalid input: {0}")]
    Malformed(String),
}

/// Inconsistencies that do not stop the computation but should be shown to
/// whoever entered the numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ReconciliationWarning {
    /// Per-party votes do not add up to the declared total.
    #[serde(rename_all = "camelCase")]
    VoteCountMismatch { declared: u64, counted: u64 },
    /// Whole quotas alone already hand out more seats than exist.
    #[serde(rename_all = "camelCase")]
    SeatsOverAllocated { seats: u64, allocated: u64 },
}

impl std::fmt::Display for ReconciliationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReconciliationWarning::VoteCountMismatch { declared, counted } => write!(
                f,
                "party votes add up to {} but total valid votes is {}",
                counted, declared
            ),
            ReconciliationWarning::SeatsOverAllocated { seats, allocated } => write!(
                f,
                "{} seats allocated from whole quotas but only {} seats exist",
                allocated, seats
            ),
        }
    }
}

#[cfg(test)]
mod error_test {

    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            ApportionError::NegativeSeats(-1).to_string(),
            "invalid input: seat count must be >= 0, got -1"
        );
        let w = ReconciliationWarning::VoteCountMismatch {
            declared: 10,
            counted: 12,
        };
        assert_eq!(
            w.to_string(),
            "party votes add up to 12 but total valid votes is 10"
        );
    }

    #[test]
    fn warning_json_shape() {
        let w = ReconciliationWarning::SeatsOverAllocated {
            seats: 2,
            allocated: 3,
        };
        let json = serde_json::to_value(&w).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "seatsOverAllocated", "seats": 2, "allocated": 3})
        );
    }
}
