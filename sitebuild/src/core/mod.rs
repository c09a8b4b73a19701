//! Pure, deterministic build logic.
//!
//! No I/O lives here. Callers pass in already-parsed records and the clock
//! values they want stamped into output.

pub mod partition;
pub mod pilot;
pub mod regions;
pub mod sitemap;
