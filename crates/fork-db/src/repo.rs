//! Aggregate repositories.
//!
//! One module per aggregate, each contributing an `impl Store` block. Query
//! shapes mirror the HTTP surface: list with paging, fetch by id, existence
//! probes for the uniqueness/relationship checks, and single-row mutations.

mod account;
mod epic;
mod project;
mod ticket;
