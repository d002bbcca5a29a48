//! Deterministic grading of impact window and door quotes.
//!
//! The [`grading`] module holds the scoring pipeline; [`config`],
//! [`telemetry`], and [`error`] carry the service plumbing shared with the
//! API binary.

pub mod config;
pub mod error;
pub mod grading;
pub mod telemetry;
