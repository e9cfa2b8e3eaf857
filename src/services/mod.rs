//! Temporal analytics and risk assessment over a user's journal entries.
//!
//! Every operation reads a fresh batch from the entry store it is handed and
//! keeps no state between calls.

pub mod backfill;
pub mod baseline;
pub mod burnout;
pub mod forecast;
pub mod insights;
pub mod lexicon;
pub mod mood_score;
pub mod patterns;
pub mod simulation;
pub mod stats;
