//! Shared types for the surebet engine.
//!
//! These types form the data model used across all modules: the
//! canonical candidate shape both extraction adapters produce, and the
//! resolved group shape the settlement calculator consumes. They are
//! designed to be stable so that extraction and settlement can depend
//! on them without circular references.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Bet result
// ---------------------------------------------------------------------------

/// Outcome of a single leg once the real-world event resolves.
///
/// The half outcomes come from handicap-line splits and partial
/// cash-outs: only half the stake is treated as won/returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetResult {
    Won,
    Lost,
    Returned,
    HalfWon,
    HalfReturned,
}

impl BetResult {
    /// All known results (useful for combination testing).
    pub const ALL: &'static [BetResult] = &[
        BetResult::Won,
        BetResult::Lost,
        BetResult::Returned,
        BetResult::HalfWon,
        BetResult::HalfReturned,
    ];
}

impl fmt::Display for BetResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetResult::Won => write!(f, "won"),
            BetResult::Lost => write!(f, "lost"),
            BetResult::Returned => write!(f, "returned"),
            BetResult::HalfWon => write!(f, "half_won"),
            BetResult::HalfReturned => write!(f, "half_returned"),
        }
    }
}

impl std::str::FromStr for BetResult {
    type Err = SurebetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "won" => Ok(BetResult::Won),
            "lost" => Ok(BetResult::Lost),
            "returned" => Ok(BetResult::Returned),
            "half_won" | "half-won" => Ok(BetResult::HalfWon),
            "half_returned" | "half-returned" => Ok(BetResult::HalfReturned),
            other => Err(SurebetError::UnknownResult(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Leg
// ---------------------------------------------------------------------------

/// One wager within a surebet group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leg {
    /// Betting house name (free text at extraction time; resolved to a
    /// registered entity by the persistence layer, not here).
    pub house: String,
    /// Free-text market description, e.g. "Over 2.25".
    pub bet_type: String,
    /// Payout multiplier applied to `stake` if the leg wins.
    pub odd: Decimal,
    /// Monetary amount risked.
    pub stake: Decimal,
    /// Profit if this particular leg is the winning one. Informational,
    /// computed by the source — never recomputed here.
    pub potential_profit: Decimal,
    /// Outcome once the event resolves; `None` while pending.
    pub result: Option<BetResult>,
    /// Realized group profit, written back identically onto every leg of
    /// the group by the settlement calculator.
    pub actual_profit: Option<Decimal>,
}

impl Leg {
    /// Build an unresolved leg.
    pub fn new(house: &str, bet_type: &str, odd: Decimal, stake: Decimal) -> Self {
        Leg {
            house: house.to_string(),
            bet_type: bet_type.to_string(),
            odd,
            stake,
            potential_profit: Decimal::ZERO,
            result: None,
            actual_profit: None,
        }
    }

    /// Whether this leg has a result.
    pub fn is_resolved(&self) -> bool {
        self.result.is_some()
    }
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = match self.result {
            Some(r) => r.to_string(),
            None => "pending".to_string(),
        };
        write!(
            f,
            "{} | {} @ {} stake={:.2} [{}]",
            self.house, self.bet_type, self.odd, self.stake, result,
        )
    }
}

// ---------------------------------------------------------------------------
// Group
// ---------------------------------------------------------------------------

/// Group lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupStatus {
    Pending,
    Resolved,
}

impl fmt::Display for GroupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupStatus::Pending => write!(f, "pending"),
            GroupStatus::Resolved => write!(f, "resolved"),
        }
    }
}

/// Two or three legs covering one event so that the group nets a small
/// guaranteed profit regardless of outcome.
///
/// Invariants: exactly 2 or 3 legs; `status` is `Resolved` iff every leg
/// has a result and `actual_profit` has been computed; once computed,
/// `actual_profit` is identical across all legs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurebetGroup {
    pub event_date: NaiveDateTime,
    pub sport: String,
    pub league: String,
    pub team_a: String,
    pub team_b: String,
    /// Theoretical arbitrage margin reported by the source. Informational,
    /// never re-derived.
    pub profit_percentage: Decimal,
    pub status: GroupStatus,
    pub legs: Vec<Leg>,
}

impl SurebetGroup {
    /// Build a pending group, enforcing the 2-or-3-legs invariant.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        event_date: NaiveDateTime,
        sport: &str,
        league: &str,
        team_a: &str,
        team_b: &str,
        profit_percentage: Decimal,
        legs: Vec<Leg>,
    ) -> Result<Self, SurebetError> {
        if legs.len() < 2 || legs.len() > 3 {
            return Err(SurebetError::LegCount(legs.len()));
        }
        Ok(SurebetGroup {
            event_date,
            sport: sport.to_string(),
            league: league.to_string(),
            team_a: team_a.to_string(),
            team_b: team_b.to_string(),
            profit_percentage,
            status: GroupStatus::Pending,
            legs,
        })
    }

    /// Whether every leg has a result.
    pub fn all_legs_resolved(&self) -> bool {
        self.legs.iter().all(Leg::is_resolved)
    }

    /// Clear every leg's result and profit, back to a pending group.
    /// This is the externally-triggered whole-group reset; the settlement
    /// calculator never calls it.
    pub fn reset_results(&mut self) {
        for leg in &mut self.legs {
            leg.result = None;
            leg.actual_profit = None;
        }
        self.status = GroupStatus::Pending;
    }
}

impl fmt::Display for SurebetGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({}) {} {:.2}% [{} legs, {}]",
            self.team_a,
            self.team_b,
            self.league,
            self.sport,
            self.profit_percentage,
            self.legs.len(),
            self.status,
        )
    }
}

// ---------------------------------------------------------------------------
// Candidate
// ---------------------------------------------------------------------------

/// One leg of an extraction candidate. Every field is independently
/// nullable: extraction may fail to find any given value, and absence
/// must propagate as `None` so the review UI forces human correction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateLeg {
    pub house: Option<String>,
    #[serde(rename = "type")]
    pub bet_type: Option<String>,
    pub odd: Option<Decimal>,
    pub stake: Option<Decimal>,
    pub profit: Option<Decimal>,
}

impl CandidateLeg {
    /// Whether the extractor found anything identifying for this leg.
    /// Mirrors the source tool's bet3 presence rule: a leg counts as
    /// detected iff house, type, or odd is present.
    pub fn is_detected(&self) -> bool {
        self.house.is_some() || self.bet_type.is_some() || self.odd.is_some()
    }
}

/// The normalizer's output: the group shape with every field nullable.
/// Legs 1–2 are mandatory slots; leg 3 exists only when a third leg was
/// actually detected (absent and present-but-empty are distinct states).
///
/// Candidates are produced once per extraction call and never mutated;
/// a human reviews them before they become persisted groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurebetCandidate {
    #[serde(rename = "date")]
    pub event_date: Option<NaiveDateTime>,
    pub sport: Option<String>,
    pub league: Option<String>,
    #[serde(rename = "teamA")]
    pub team_a: Option<String>,
    #[serde(rename = "teamB")]
    pub team_b: Option<String>,
    #[serde(default)]
    pub bet1: CandidateLeg,
    #[serde(default)]
    pub bet2: CandidateLeg,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bet3: Option<CandidateLeg>,
    #[serde(rename = "profitPercentage")]
    pub profit_percentage: Option<Decimal>,
}

impl SurebetCandidate {
    /// Whether extraction found nothing at all. Callers use this (and
    /// candidate counts) for their success/failure messaging — the
    /// adapters themselves never fail.
    pub fn is_empty(&self) -> bool {
        self.event_date.is_none()
            && self.sport.is_none()
            && self.league.is_none()
            && self.team_a.is_none()
            && self.team_b.is_none()
            && self.profit_percentage.is_none()
            && !self.bet1.is_detected()
            && !self.bet2.is_detected()
            && self.bet3.is_none()
    }
}

impl fmt::Display for SurebetCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let team_a = self.team_a.as_deref().unwrap_or("?");
        let team_b = self.team_b.as_deref().unwrap_or("?");
        let legs = if self.bet3.is_some() { 3 } else { 2 };
        write!(f, "{team_a} - {team_b} ({legs} legs)")
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for the surebet engine.
#[derive(Debug, thiserror::Error)]
pub enum SurebetError {
    #[error("a surebet group must have 2 or 3 legs, got {0}")]
    LegCount(usize),

    #[error("unknown bet result: {0}")]
    UnknownResult(String),

    #[error("no candidates could be extracted from the input")]
    NoCandidates,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn event_date() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 11, 17)
            .unwrap()
            .and_hms_opt(6, 0, 0)
            .unwrap()
    }

    fn two_legs() -> Vec<Leg> {
        vec![
            Leg::new("Pinnacle", "Over 2.25", dec!(1.95), dec!(106)),
            Leg::new("Bet365 (BR)", "Under 2.25", dec!(2.10), dec!(100)),
        ]
    }

    // -- BetResult tests --

    #[test]
    fn test_bet_result_serde_uses_snake_case() {
        assert_eq!(serde_json::to_string(&BetResult::HalfWon).unwrap(), "\"half_won\"");
        assert_eq!(
            serde_json::from_str::<BetResult>("\"half_returned\"").unwrap(),
            BetResult::HalfReturned
        );
    }

    #[test]
    fn test_bet_result_from_str() {
        assert_eq!("won".parse::<BetResult>().unwrap(), BetResult::Won);
        assert_eq!("HALF_WON".parse::<BetResult>().unwrap(), BetResult::HalfWon);
        assert_eq!("half-returned".parse::<BetResult>().unwrap(), BetResult::HalfReturned);
        assert!("draw".parse::<BetResult>().is_err());
    }

    #[test]
    fn test_bet_result_all() {
        assert_eq!(BetResult::ALL.len(), 5);
    }

    // -- Leg tests --

    #[test]
    fn test_leg_new_is_unresolved() {
        let leg = Leg::new("Pinnacle", "Over 2.25", dec!(1.95), dec!(100));
        assert!(!leg.is_resolved());
        assert!(leg.actual_profit.is_none());
    }

    #[test]
    fn test_leg_display_pending() {
        let leg = Leg::new("Pinnacle", "Over 2.25", dec!(1.95), dec!(100));
        let display = format!("{leg}");
        assert!(display.contains("Pinnacle"));
        assert!(display.contains("pending"));
    }

    // -- SurebetGroup tests --

    #[test]
    fn test_group_two_legs_ok() {
        let group = SurebetGroup::new(
            event_date(),
            "Futebol",
            "Série A",
            "Flamengo",
            "Santos",
            dec!(2.5),
            two_legs(),
        );
        assert!(group.is_ok());
        assert_eq!(group.unwrap().status, GroupStatus::Pending);
    }

    #[test]
    fn test_group_three_legs_ok() {
        let mut legs = two_legs();
        legs.push(Leg::new("Betano (BR)", "Exactly 2.25", dec!(8.0), dec!(20)));
        let group = SurebetGroup::new(
            event_date(),
            "Futebol",
            "Série A",
            "Flamengo",
            "Santos",
            dec!(2.5),
            legs,
        );
        assert!(group.is_ok());
    }

    #[test]
    fn test_group_rejects_wrong_leg_count() {
        let one = vec![Leg::new("Pinnacle", "Over", dec!(1.95), dec!(100))];
        let err =
            SurebetGroup::new(event_date(), "Futebol", "L", "A", "B", dec!(1.0), one).unwrap_err();
        assert!(matches!(err, SurebetError::LegCount(1)));

        let mut four = two_legs();
        four.extend(two_legs());
        let err =
            SurebetGroup::new(event_date(), "Futebol", "L", "A", "B", dec!(1.0), four).unwrap_err();
        assert!(matches!(err, SurebetError::LegCount(4)));
    }

    #[test]
    fn test_group_reset_results() {
        let mut group =
            SurebetGroup::new(event_date(), "Futebol", "L", "A", "B", dec!(2.5), two_legs())
                .unwrap();
        group.legs[0].result = Some(BetResult::Won);
        group.legs[1].result = Some(BetResult::Lost);
        group.legs[0].actual_profit = Some(dec!(6.70));
        group.legs[1].actual_profit = Some(dec!(6.70));
        group.status = GroupStatus::Resolved;

        group.reset_results();

        assert_eq!(group.status, GroupStatus::Pending);
        assert!(group.legs.iter().all(|l| l.result.is_none()));
        assert!(group.legs.iter().all(|l| l.actual_profit.is_none()));
    }

    #[test]
    fn test_group_all_legs_resolved() {
        let mut group =
            SurebetGroup::new(event_date(), "Futebol", "L", "A", "B", dec!(2.5), two_legs())
                .unwrap();
        assert!(!group.all_legs_resolved());
        group.legs[0].result = Some(BetResult::Won);
        assert!(!group.all_legs_resolved());
        group.legs[1].result = Some(BetResult::Lost);
        assert!(group.all_legs_resolved());
    }

    #[test]
    fn test_group_serialization_roundtrip() {
        let group = SurebetGroup::new(
            event_date(),
            "Futebol",
            "Série A",
            "Flamengo",
            "Santos",
            dec!(2.5),
            two_legs(),
        )
        .unwrap();
        let json = serde_json::to_string(&group).unwrap();
        let parsed: SurebetGroup = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.team_a, "Flamengo");
        assert_eq!(parsed.status, GroupStatus::Pending);
        assert_eq!(parsed.legs.len(), 2);
        assert_eq!(parsed.legs[0].odd, dec!(1.95));
    }

    // -- Candidate tests --

    #[test]
    fn test_candidate_default_is_empty() {
        let candidate = SurebetCandidate::default();
        assert!(candidate.is_empty());
        assert!(candidate.bet3.is_none());
    }

    #[test]
    fn test_candidate_with_leg_not_empty() {
        let candidate = SurebetCandidate {
            bet1: CandidateLeg {
                house: Some("Pinnacle".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(!candidate.is_empty());
    }

    #[test]
    fn test_candidate_leg_detection_rule() {
        assert!(!CandidateLeg::default().is_detected());
        let by_odd = CandidateLeg { odd: Some(dec!(1.95)), ..Default::default() };
        assert!(by_odd.is_detected());
        // stake alone does not count as detection
        let by_stake = CandidateLeg { stake: Some(dec!(100)), ..Default::default() };
        assert!(!by_stake.is_detected());
    }

    #[test]
    fn test_candidate_serialization_uses_source_field_names() {
        let candidate = SurebetCandidate {
            team_a: Some("Flamengo".to_string()),
            profit_percentage: Some(dec!(2.5)),
            ..Default::default()
        };
        let json = serde_json::to_value(&candidate).unwrap();
        assert_eq!(json["teamA"], "Flamengo");
        assert!(json["profitPercentage"].is_number());
        // absent bet3 must be omitted, not serialized as null
        assert!(json.get("bet3").is_none());
    }

    // -- Error tests --

    #[test]
    fn test_error_display() {
        let e = SurebetError::LegCount(5);
        assert_eq!(format!("{e}"), "a surebet group must have 2 or 3 legs, got 5");
        assert!(format!("{}", SurebetError::NoCandidates).contains("no candidates"));
    }
}
