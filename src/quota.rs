use crate::error::ApportionError;

/// Droop quota: `floor(total_valid_votes / (seats + 1)) + 1`.
///
/// At most `seats` parties can clear this many votes each, so whole-quota
/// seats never exceed the seat count when the tally is consistent.
pub fn compute_quota(total_valid_votes: i64, seats: i64) -> Result<u64, ApportionError> {
    if seats < 0 {
        return Err(ApportionError::NegativeSeats(seats));
    }
    if total_valid_votes < 0 {
        return Err(ApportionError::NegativeTotal(total_valid_votes));
    }

    // both are non-negative i64, so seats + 1 fits in u64
    let divisor = seats as u64 + 1;
    Ok(total_valid_votes as u64 / divisor + 1)
}
