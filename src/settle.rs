//! Settlement calculator — realized profit for a resolved surebet group.
//!
//! The legacy system enumerated every outcome combination (won+lost,
//! won+returned, half_won+lost, …) as its own branch. Here each leg
//! contributes a net amount on its own and the group profit is the sum;
//! the combination tests below pin the sum to the values the old branch
//! table produced for every pairwise case.
//!
//! Pure computation over in-memory data. The only "failure" is being
//! asked too early: any unresolved leg makes the profit not-yet-
//! computable (`None`), never an error.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::types::{BetResult, GroupStatus, Leg, SurebetGroup};

/// Net contribution of a single resolved leg, `None` while unresolved.
///
/// - `won`: `stake × (odd − 1)`
/// - `lost`: `−stake`
/// - `returned`: `0` — the stake simply comes back
/// - `half_won`: `(stake/2) × (odd − 1)` — the other half is returned
/// - `half_returned`: `−stake/2` — only half the stake comes back
pub fn leg_contribution(leg: &Leg) -> Option<Decimal> {
    let contribution = match leg.result? {
        BetResult::Won => leg.stake * (leg.odd - Decimal::ONE),
        BetResult::Lost => -leg.stake,
        BetResult::Returned => Decimal::ZERO,
        BetResult::HalfWon => leg.stake / dec!(2) * (leg.odd - Decimal::ONE),
        BetResult::HalfReturned => -(leg.stake / dec!(2)),
    };
    Some(contribution)
}

/// Realized profit for a set of legs: the sum of every contribution, or
/// `None` if any leg is still unresolved.
pub fn group_profit(legs: &[Leg]) -> Option<Decimal> {
    legs.iter().map(leg_contribution).sum()
}

/// Settle a group once every leg has a result.
///
/// Writes the identical profit onto every leg's `actual_profit` (single
/// source of truth, replicated for read convenience) and flips the group
/// to `Resolved`. An unresolved group is left untouched and yields
/// `None`. Idempotent — settling twice produces the same value.
///
/// Result-updates for legs of one group arrive asynchronously; callers
/// must invoke this only once all legs are known-resolved and apply the
/// write-back as a single update covering the whole group.
pub fn settle(group: &mut SurebetGroup) -> Option<Decimal> {
    let profit = group_profit(&group.legs)?;

    for leg in &mut group.legs {
        leg.actual_profit = Some(profit);
    }
    group.status = GroupStatus::Resolved;

    debug!(
        group = %group,
        profit = %profit,
        "group settled"
    );

    Some(profit)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
