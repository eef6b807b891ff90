use crate::error::{ApportionError, ReconciliationWarning};
use crate::quota::compute_quota;
use crate::tally::VoteTally;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationResult {
    pub party: String,
    pub votes: u64,
    pub initial_seats: u64,
    pub residual_votes: u64,
    pub bonus_seats: u64,
    pub total_seats: u64,
}

/// The grand-total row under the per-party results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub votes: u64,
    pub initial_seats: u64,
    pub residual_votes: u64,
    pub bonus_seats: u64,
    pub total_seats: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Apportionment {
    pub quota: u64,
    pub results: Vec<AllocationResult>,
    pub totals: Totals,
    pub warnings: Vec<ReconciliationWarning>,
    pub unassigned_seats: u64,
}

impl Apportionment {
    pub fn seats_of(&self, party: &str) -> Option<u64> {
        self.results
            .iter()
            .find(|r| r.party == party)
            .map(|r| r.total_seats)
    }

    pub fn is_reconciled(&self) -> bool {
        self.warnings.is_empty() && self.unassigned_seats == 0
    }
}

/// Hare-style largest remainder over a Droop quota.
#[derive(Debug)]
pub struct LargestRemainder<'a> {
    total_valid_votes: i64,
    seats: i64,
    tally: &'a VoteTally,
}

impl<'a> LargestRemainder<'a> {
    pub fn new(total_valid_votes: i64, seats: i64, tally: &'a VoteTally) -> Self {
        Self {
            total_valid_votes,
            seats,
            tally,
        }
    }

    pub fn calculate(&self) -> Result<Apportionment, ApportionError> {
        let quota = compute_quota(self.total_valid_votes, self.seats)?;
        // compute_quota has rejected negatives
        let seats = self.seats as u64;
        let declared = self.total_valid_votes as u64;

        debug!(
            "quota {} for {} votes over {} seats",
            quota, declared, seats
        );

        let mut warnings = Vec::new();

        let counted = self.tally.total();
        if counted != declared {
            let w = ReconciliationWarning::VoteCountMismatch { declared, counted };
            warn!("{}", w);
            warnings.push(w);
        }

        let (mut results, seats_remaining) = allocate_initial(self.tally, quota, seats)?;

        if seats_remaining < 0 {
            let allocated = results
                .iter()
                .fold(0u64, |acc, r| acc.saturating_add(r.initial_seats));
            let w = ReconciliationWarning::SeatsOverAllocated { seats, allocated };
            warn!("{}", w);
            warnings.push(w);
        }

        let seats_remaining = if seats_remaining > 0 {
            seats_remaining as u64
        } else {
            0
        };

        let unassigned_seats = allocate_bonus(&mut results, seats_remaining);
        if unassigned_seats > 0 {
            warn!("{} seats left unassigned, no parties to receive them", unassigned_seats);
        }

        let (results, totals) = finalize(results);

        Ok(Apportionment {
            quota,
            results,
            totals,
            warnings,
            unassigned_seats,
        })
    }
}

/// Whole-quota seats per party, in descending vote order (stable on ties).
///
/// The returned remainder is `seats - sum(initial_seats)` and goes negative
/// when the tally holds more votes than the quota was computed from.
pub fn allocate_initial(
    tally: &VoteTally,
    quota: u64,
    seats: u64,
) -> Result<(Vec<AllocationResult>, i64), ApportionError> {
    if quota == 0 {
        return Err(ApportionError::ZeroQuota);
    }

    let mut results: Vec<AllocationResult> = tally
        .iter()
        .map(|(party, votes)| {
            let initial_seats = votes / quota;
            AllocationResult {
                party: party.to_string(),
                votes,
                initial_seats,
                residual_votes: votes % quota,
                bonus_seats: 0,
                total_seats: initial_seats,
            }
        })
        .collect();

    results.sort_by(|a, b| b.votes.cmp(&a.votes));

    let allocated = results
        .iter()
        .fold(0i128, |acc, r| acc + r.initial_seats as i128);
    let remaining = seats as i128 - allocated;
    let remaining = if remaining > i64::MAX as i128 {
        i64::MAX
    } else if remaining < i64::MIN as i128 {
        i64::MIN
    } else {
        remaining as i64
    };

    Ok((results, remaining))
}

/// Hands out `seats_remaining` down the residual ranking, one seat per party
/// per pass. Returns seats that could not be placed.
///
/// Residuals never change between passes, so every pass ranks the parties
/// the same way: full passes are granted in one step and only the last,
/// partial pass walks the ranking.
pub fn allocate_bonus(results: &mut Vec<AllocationResult>, mut seats_remaining: u64) -> u64 {
    if results.is_empty() {
        return seats_remaining;
    }

    // sort_by is stable: equal residuals keep their previous order
    results.sort_by(|a, b| b.residual_votes.cmp(&a.residual_votes));

    let parties = results.len() as u64;
    let full_passes = seats_remaining / parties;
    if full_passes > 0 {
        for r in results.iter_mut() {
            r.bonus_seats += full_passes;
            r.total_seats = r.initial_seats.saturating_add(r.bonus_seats);
        }
        seats_remaining -= full_passes * parties;
        debug!(
            "{} full bonus passes, {} seats left",
            full_passes, seats_remaining
        );
    }

    for r in results.iter_mut().take(seats_remaining as usize) {
        r.bonus_seats += 1;
        r.total_seats = r.initial_seats.saturating_add(r.bonus_seats);
    }

    0
}

/// Orders by total seats (stable) and sums the grand-total row.
pub fn finalize(mut results: Vec<AllocationResult>) -> (Vec<AllocationResult>, Totals) {
    results.sort_by(|a, b| b.total_seats.cmp(&a.total_seats));

    let totals = results.iter().fold(Totals::default(), |acc, r| Totals {
        votes: acc.votes.saturating_add(r.votes),
        initial_seats: acc.initial_seats.saturating_add(r.initial_seats),
        residual_votes: acc.residual_votes.saturating_add(r.residual_votes),
        bonus_seats: acc.bonus_seats.saturating_add(r.bonus_seats),
        total_seats: acc.total_seats.saturating_add(r.total_seats),
    });

    (results, totals)
}
