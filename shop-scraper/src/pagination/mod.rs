//! Result pagination: boundary probing, parallel page dispatch, aggregation.
//!
//! The listing's page count is unknown up front. [`controller::Paginator`]
//! finds the last page by probing sequentially, fetches every non-empty page
//! concurrently, and hands the per-page sets to [`aggregate::aggregate`].

pub mod aggregate;
pub mod controller;
pub mod query;

pub use controller::{Boundary, Paginator, ProbeOutcome, ProbeState};
