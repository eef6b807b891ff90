use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

mod error;
pub mod largest_remainder;
mod quota;
pub mod rpc;
mod tally;

pub use error::{ApportionError, ReconciliationWarning};
pub use largest_remainder::{
    allocate_bonus, allocate_initial, finalize, AllocationResult, Apportionment,
    LargestRemainder, Totals,
};
pub use quota::compute_quota;
pub use tally::VoteTally;

/// Everything one district's calculation needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApportionmentInput {
    pub total_valid_votes: i64,
    pub seats: i64,
    pub tally: VoteTally,
}

impl ApportionmentInput {
    pub fn new(total_valid_votes: i64, seats: i64, tally: VoteTally) -> Self {
        Self {
            total_valid_votes,
            seats,
            tally,
        }
    }

    pub fn apportion(&self) -> Result<Apportionment, ApportionError> {
        LargestRemainder::new(self.total_valid_votes, self.seats, &self.tally).calculate()
    }

    /// SHA-256 over seats, total and every tally entry in order. Tally order
    /// feeds the tie-break, so reordering parties changes the hash.
    pub fn hash(&self) -> Vec<u8> {
        let mut hasher = Sha256::new();
        hasher.update(self.total_valid_votes.to_be_bytes());
        hasher.update(self.seats.to_be_bytes());
        for (party, votes) in self.tally.iter() {
            hasher.update((party.len() as u64).to_be_bytes());
            hasher.update(party.as_bytes());
            hasher.update(votes.to_be_bytes());
        }
        hasher.finalize().to_vec()
    }

    pub fn dummy() -> Self {
        let tally: VoteTally = [("A", 500u64), ("B", 300), ("C", 200)]
            .iter()
            .cloned()
            .collect();
        Self::new(1000, 5, tally)
    }
}
