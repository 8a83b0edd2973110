//! Bulk-paste adapter — line-oriented parser for the tracking-spreadsheet
//! dialect.
//!
//! Users paste one big block copied from a third-party spreadsheet. Each
//! surebet is a header line (date/time, sport, "Team A - Team B (League)
//! NN.NN%") followed by 2 or 3 tab-delimited leg lines. The paste is
//! heterogeneous manual copy-work, so the parser is permissive by design:
//! a malformed group is silently skipped to maximize yield from the rest
//! of the block, and the caller decides whether "0 candidates" is a
//! failure worth reporting.
//!
//! Unlike the OCR adapter, a header with an unreadable date gets the
//! current timestamp instead of `None` — this dialect has no way to
//! signal "date absent", so a placeholder beats dropping the group.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};
use deunicode::deunicode;
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

use crate::types::{CandidateLeg, SurebetCandidate};

lazy_static! {
    /// `DD <month-name> HH:MM ...` — month names may carry accents ("março").
    static ref MONTH_HEADER_RE: Regex =
        Regex::new(r"^(\d{1,2})\s+([\p{L}.]+)\s+(\d{2}:\d{2})\s*(.*)$").unwrap();
    /// `DD/MM/YYYY HH:MM ...`
    static ref NUMERIC_HEADER_RE: Regex =
        Regex::new(r"^(\d{2})/(\d{2})/(\d{4})\s+(\d{2}:\d{2})\s*(.*)$").unwrap();
    /// `TEAM_A - TEAM_B (LEAGUE) NN.NN%` — the team dash may be an ASCII
    /// hyphen or a Unicode en/em dash.
    static ref EVENT_RE: Regex =
        Regex::new(r"^(.+?)\s*[-\u{2013}\u{2014}]\s*(.+?)\s*\(([^)]+)\)\s*(\d+(?:[.,]\d+)?)\s*%").unwrap();
}

/// Characters accepted between the sport name and the event description.
const SPORT_SEPARATORS: &[char] = &['.', '·', '–', '—'];

/// Fixed Portuguese/English month abbreviation table. Lookup happens on
/// the lowercased, punctuation-stripped, diacritics-folded first three
/// characters of the month name.
const MONTH_ABBREVIATIONS: &[(&str, u32)] = &[
    ("jan", 1),
    ("fev", 2),
    ("feb", 2),
    ("mar", 3),
    ("abr", 4),
    ("apr", 4),
    ("mai", 5),
    ("may", 5),
    ("jun", 6),
    ("jul", 7),
    ("ago", 8),
    ("aug", 8),
    ("set", 9),
    ("sep", 9),
    ("out", 10),
    ("oct", 10),
    ("nov", 11),
    ("dez", 12),
    ("dec", 12),
];

/// Parse a pasted block using the local clock for the default year and
/// the unreadable-date placeholder.
pub fn extract(text: &str) -> Vec<SurebetCandidate> {
    parse(text, Local::now().naive_local())
}

/// Parse a pasted block into zero or more candidates.
///
/// `now` supplies the default year for the `DD <month> HH:MM` form
/// (which carries no year) and the placeholder timestamp for headers
/// whose date cannot be read; passing it explicitly keeps the parser a
/// pure function. Never errors — the worst input yields an empty vec.
pub fn parse(text: &str, now: NaiveDateTime) -> Vec<SurebetCandidate> {
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();

    let header_indices: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| is_header(line))
        .map(|(i, _)| i)
        .collect();

    let mut candidates = Vec::new();
    for (n, &start) in header_indices.iter().enumerate() {
        let end = header_indices.get(n + 1).copied().unwrap_or(lines.len());
        let group = &lines[start..end];

        // header + 2 legs minimum
        if group.len() < 3 {
            debug!(header = group[0], lines = group.len(), "group too short, skipped");
            continue;
        }

        match parse_group(group, now) {
            Some(candidate) => candidates.push(candidate),
            None => debug!(header = group[0], "malformed group skipped"),
        }
    }

    candidates
}

fn is_header(line: &str) -> bool {
    MONTH_HEADER_RE.is_match(line) || NUMERIC_HEADER_RE.is_match(line)
}

/// Parse one header + leg-lines slice. `None` discards the whole group:
/// both mandatory legs and the event pattern must parse or neither is
/// kept. A malformed third line only means "no triple leg".
fn parse_group(lines: &[&str], now: NaiveDateTime) -> Option<SurebetCandidate> {
    let header = collapse_whitespace(lines[0]);
    let (event_date, tail) = parse_header_date(&header, now);

    let (sport, event) = split_sport(&tail)?;
    let captures = EVENT_RE.captures(event)?;
    let team_a = captures[1].trim().to_string();
    let team_b = captures[2].trim().to_string();
    let league = captures[3].trim().to_string();
    let profit_percentage = parse_decimal(&captures[4]).unwrap_or(Decimal::ZERO);

    let bet1 = parse_leg(lines[1])?;
    let bet2 = parse_leg(lines[2])?;
    let bet3 = lines.get(3).and_then(|line| parse_leg(line));

    Some(SurebetCandidate {
        event_date: Some(event_date),
        sport: if sport.is_empty() { None } else { Some(sport.to_string()) },
        league: Some(league),
        team_a: Some(team_a),
        team_b: Some(team_b),
        bet1,
        bet2,
        bet3,
        profit_percentage: Some(profit_percentage),
    })
}

/// Collapse runs of spaces/tabs to single spaces (the paste often carries
/// the spreadsheet's alignment whitespace).
fn collapse_whitespace(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract the event timestamp from a normalized header line and return
/// it together with the rest of the line (the sport/event text).
///
/// Two formats are tried independently; a header matching neither, or
/// naming an impossible calendar day, gets `now` as a placeholder.
fn parse_header_date(header: &str, now: NaiveDateTime) -> (NaiveDateTime, String) {
    if let Some(c) = NUMERIC_HEADER_RE.captures(header) {
        let tail = c[5].to_string();
        let date = c[3]
            .parse::<i32>()
            .ok()
            .and_then(|year| {
                let day = c[1].parse().ok()?;
                let month = c[2].parse().ok()?;
                NaiveDate::from_ymd_opt(year, month, day)
            })
            .and_then(|date| Some(date.and_time(parse_time(&c[4])?)));
        return (date.unwrap_or(now), tail);
    }

    if let Some(c) = MONTH_HEADER_RE.captures(header) {
        let tail = c[4].to_string();
        let date = c[1]
            .parse::<u32>()
            .ok()
            .and_then(|day| {
                // the format carries no year; assume the current one
                NaiveDate::from_ymd_opt(now.year(), month_number(&c[2]), day)
            })
            .and_then(|date| Some(date.and_time(parse_time(&c[3])?)));
        return (date.unwrap_or(now), tail);
    }

    (now, header.to_string())
}

fn parse_time(token: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(token, "%H:%M").ok()
}

/// Month-name lookup: lowercase, strip trailing punctuation, fold Latin
/// diacritics to ASCII ("março" → "marco"), truncate to three characters.
/// Unrecognized abbreviations fall back to January rather than failing.
fn month_number(name: &str) -> u32 {
    let folded = deunicode(&name.to_lowercase());
    let cleaned = folded.trim_end_matches(|c: char| !c.is_ascii_alphanumeric());
    let key: String = cleaned.chars().take(3).collect();
    MONTH_ABBREVIATIONS
        .iter()
        .find(|(abbr, _)| *abbr == key)
        .map(|(_, month)| *month)
        .unwrap_or(1)
}

/// Split `Futebol.Team A - Team B (...)` at the first sport separator.
fn split_sport(tail: &str) -> Option<(&str, &str)> {
    let idx = tail.find(SPORT_SEPARATORS)?;
    let separator_len = tail[idx..].chars().next()?.len_utf8();
    let sport = tail[..idx].trim();
    let event = tail[idx + separator_len..].trim();
    Some((sport, event))
}

/// Parse one tab-delimited leg line: house, type, odd, stake, an ignored
/// column, profit. Fewer than 6 non-empty tokens → not a leg.
fn parse_leg(line: &str) -> Option<CandidateLeg> {
    let tokens: Vec<&str> = line.split('\t').map(str::trim).filter(|t| !t.is_empty()).collect();
    if tokens.len() < 6 {
        return None;
    }
    Some(CandidateLeg {
        house: Some(tokens[0].to_string()),
        bet_type: Some(tokens[1].to_string()),
        odd: Some(parse_decimal(tokens[2]).unwrap_or(Decimal::ZERO)),
        stake: Some(parse_decimal(tokens[3]).unwrap_or(Decimal::ZERO)),
        // tokens[4] is a column the source dialect carries but this
        // record has no use for
        profit: Some(parse_decimal(tokens[5]).unwrap_or(Decimal::ZERO)),
    })
}

/// Numeric parse tolerant of the pt-BR decimal comma ("1,95").
fn parse_decimal(token: &str) -> Option<Decimal> {
    Decimal::from_str(token)
        .or_else(|_| Decimal::from_str(&token.replace(',', ".")))
        .ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
