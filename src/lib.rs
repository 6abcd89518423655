//! Shooting statistics from football match event data.
//!
//! Filters an event table down to one team (and optionally one player),
//! turns its shots into validated records, and derives the headline numbers
//! plus the pitch and goal-mouth point sets a plotting layer draws.

pub mod config;
pub mod data;
pub mod monitoring;
pub mod report;
pub mod shots;
