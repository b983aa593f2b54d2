//! University shortlisting engine.
//!
//! An applicant's raw inputs are normalized into a profile vector, scored
//! against per-country weightings, compared with each university's required
//! profile score, and the resulting gap-sorted list is split into Ambitious,
//! Target, and Safe bands around an anchor university.

pub mod config;
pub mod error;
pub mod finder;
pub mod tables;
pub mod telemetry;
