//! Database repositories for the post-trade monitor.
//!
//! Each repository provides typed access to a table with batch insert
//! capabilities and time-range queries.

pub mod trade_repo;
