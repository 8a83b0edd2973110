//! Surebet extraction & settlement engine.
//!
//! Two independently usable components composed through one canonical
//! data shape:
//!
//! - [`extract`] turns raw heterogeneous input — the external OCR tool's
//!   JSON, or free-form text pasted from a tracking spreadsheet — into
//!   [`types::SurebetCandidate`]s. Absence of data propagates as `None`,
//!   never as a guessed value.
//! - [`settle`] computes the realized profit of a [`types::SurebetGroup`]
//!   once every leg has a result, with one additive per-leg formula
//!   instead of a branch per outcome combination.
//!
//! Everything is pure and synchronous; HTTP, persistence, the OCR
//! subprocess and the review UI are external collaborators.

pub mod config;
pub mod extract;
pub mod settle;
pub mod types;
