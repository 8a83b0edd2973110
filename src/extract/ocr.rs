//! OCR adapter — validates the PDF-text tool's loosely-typed JSON.
//!
//! The external tool runs against an uploaded PDF and prints a JSON
//! object with optional `date, sport, league, teamA, teamB, bet1, bet2,
//! bet3, profitPercentage` fields (legs carry optional `house, odd,
//! type, stake, profit`). This adapter only checks presence: every
//! missing or falsy field becomes `None`, nothing is ever defaulted or
//! guessed. Guessed financial data is worse than none — a `None` is the
//! review UI's cue to force manual correction.
//!
//! This adapter cannot fail; the worst input produces a maximally-null
//! candidate.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use crate::types::{CandidateLeg, SurebetCandidate};

/// The exact timestamp shape the OCR tool emits.
const OCR_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Normalize one OCR-tool JSON object into a candidate. Pure, infallible.
pub fn normalize(raw: &Value) -> SurebetCandidate {
    let bet3 = leg(raw.get("bet3"));

    SurebetCandidate {
        event_date: date_field(raw.get("date")),
        sport: string_field(raw.get("sport")),
        league: string_field(raw.get("league")),
        team_a: string_field(raw.get("teamA")),
        team_b: string_field(raw.get("teamB")),
        bet1: leg(raw.get("bet1")),
        bet2: leg(raw.get("bet2")),
        // a third leg exists only when something identifying was found;
        // "leg present but empty" must read as "no third leg"
        bet3: if bet3.is_detected() { Some(bet3) } else { None },
        profit_percentage: decimal_field(raw.get("profitPercentage")),
    }
}

fn leg(raw: Option<&Value>) -> CandidateLeg {
    match raw {
        Some(v) => CandidateLeg {
            house: string_field(v.get("house")),
            bet_type: string_field(v.get("type")),
            odd: decimal_field(v.get("odd")),
            stake: decimal_field(v.get("stake")),
            profit: decimal_field(v.get("profit")),
        },
        None => CandidateLeg::default(),
    }
}

/// A string field is present iff it is a non-blank JSON string.
fn string_field(raw: Option<&Value>) -> Option<String> {
    let s = raw?.as_str()?.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// A numeric field is present iff it carries a non-zero finite number.
/// The tool emits JSON numbers; numeric strings are tolerated since some
/// OCR runs quote them. Zero is the tool's own "nothing found" marker
/// (and a zero odd or stake is not a valid wager), so it maps to `None`.
fn decimal_field(raw: Option<&Value>) -> Option<Decimal> {
    let value = match raw? {
        // serde_json renders numbers in their shortest decimal form, so
        // going through the text keeps 1.95 exactly 1.95
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok()?,
        Value::String(s) => Decimal::from_str(s.trim()).ok()?,
        _ => return None,
    };
    if value.is_zero() {
        None
    } else {
        Some(value)
    }
}

/// The date is accepted only in the exact shape the tool emits.
fn date_field(raw: Option<&Value>) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw?.as_str()?.trim(), OCR_DATE_FORMAT).ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_empty_object_is_all_null() {
        let candidate = normalize(&json!({}));
        assert!(candidate.is_empty());
        assert!(candidate.event_date.is_none());
        assert!(candidate.bet1.house.is_none());
        assert!(candidate.bet1.odd.is_none());
        assert!(candidate.bet3.is_none());
    }

    #[test]
    fn test_full_extraction() {
        let raw = json!({
            "date": "2025-11-17T06:00",
            "sport": "Futebol",
            "league": "Copa SP de Futebol Júnior",
            "teamA": "Red Bull Bragantino U20",
            "teamB": "Santos U20",
            "bet1": {
                "house": "Pinnacle",
                "odd": 1.95,
                "type": "Over 2.25",
                "stake": 106.0,
                "profit": 6.70
            },
            "bet2": {
                "house": "Bet365 (BR)",
                "odd": 2.10,
                "type": "Under 2.25",
                "stake": 100.0,
                "profit": 6.70
            },
            "profitPercentage": 3.25
        });

        let candidate = normalize(&raw);
        assert_eq!(
            candidate.event_date.unwrap().format("%Y-%m-%dT%H:%M").to_string(),
            "2025-11-17T06:00"
        );
        assert_eq!(candidate.sport.as_deref(), Some("Futebol"));
        assert_eq!(candidate.team_a.as_deref(), Some("Red Bull Bragantino U20"));
        assert_eq!(candidate.bet1.house.as_deref(), Some("Pinnacle"));
        assert_eq!(candidate.bet1.odd, Some(dec!(1.95)));
        assert_eq!(candidate.bet1.stake, Some(dec!(106)));
        assert_eq!(candidate.bet2.profit, Some(dec!(6.70)));
        assert_eq!(candidate.profit_percentage, Some(dec!(3.25)));
        assert!(candidate.bet3.is_none());
    }

    #[test]
    fn test_null_fields_stay_null() {
        let raw = json!({
            "date": null,
            "sport": null,
            "teamA": "Flamengo",
            "bet1": { "house": "KTO (BR)", "odd": null, "type": null, "stake": null, "profit": null }
        });
        let candidate = normalize(&raw);
        assert!(candidate.event_date.is_none());
        assert!(candidate.sport.is_none());
        assert_eq!(candidate.team_a.as_deref(), Some("Flamengo"));
        assert_eq!(candidate.bet1.house.as_deref(), Some("KTO (BR)"));
        assert!(candidate.bet1.odd.is_none());
        assert!(candidate.bet1.stake.is_none());
    }

    #[test]
    fn test_falsy_values_become_null() {
        let raw = json!({
            "sport": "",
            "league": "   ",
            "bet1": { "house": "", "odd": 0, "stake": 0.0 }
        });
        let candidate = normalize(&raw);
        assert!(candidate.sport.is_none());
        assert!(candidate.league.is_none());
        assert!(candidate.bet1.house.is_none());
        assert!(candidate.bet1.odd.is_none());
        assert!(candidate.bet1.stake.is_none());
    }

    #[test]
    fn test_bet3_present_when_any_identifying_field_set() {
        let by_house = normalize(&json!({ "bet3": { "house": "Betano (BR)" } }));
        assert!(by_house.bet3.is_some());

        let by_type = normalize(&json!({ "bet3": { "type": "Empate" } }));
        assert!(by_type.bet3.is_some());

        let by_odd = normalize(&json!({ "bet3": { "odd": 8.5 } }));
        assert_eq!(by_odd.bet3.unwrap().odd, Some(dec!(8.5)));
    }

    #[test]
    fn test_bet3_omitted_when_empty() {
        // all-null third leg is "no third leg", not "third leg with no data"
        let raw = json!({ "bet3": { "house": null, "odd": null, "type": null } });
        assert!(normalize(&raw).bet3.is_none());

        // stake/profit alone do not make a leg
        let raw = json!({ "bet3": { "stake": 50.0, "profit": 1.2 } });
        assert!(normalize(&raw).bet3.is_none());
    }

    #[test]
    fn test_malformed_date_is_null_not_guessed() {
        for bad in ["17/11/2025 06:00", "2025-11-17", "amanhã", "2025-13-40T99:99"] {
            let candidate = normalize(&json!({ "date": bad }));
            assert!(candidate.event_date.is_none(), "date {bad:?} should not parse");
        }
    }

    #[test]
    fn test_numeric_strings_tolerated() {
        let raw = json!({ "bet1": { "odd": "1.95", "stake": "106.00" } });
        let candidate = normalize(&raw);
        assert_eq!(candidate.bet1.odd, Some(dec!(1.95)));
        assert_eq!(candidate.bet1.stake, Some(dec!(106.00)));
    }

    #[test]
    fn test_wrong_types_become_null() {
        let raw = json!({
            "sport": 42,
            "profitPercentage": "three percent",
            "bet1": { "odd": [1.95], "house": { "name": "Pinnacle" } }
        });
        let candidate = normalize(&raw);
        assert!(candidate.sport.is_none());
        assert!(candidate.profit_percentage.is_none());
        assert!(candidate.bet1.odd.is_none());
        assert!(candidate.bet1.house.is_none());
    }
}
