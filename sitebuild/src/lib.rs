//! Static-site build tools for the pilot directory.
//!
//! Two independent batch jobs read the same `pilots.json` dataset:
//!
//! - **[`sitemap`]**: static pages plus one profile URL per real pilot,
//!   written as `sitemap.xml`.
//! - **[`split`]**: one JSON shard per valid region plus an index, written
//!   under `data/`.
//!
//! The layout separates pure logic from side effects:
//!
//! - **[`core`]**: Record accessors, region table, sitemap entries,
//!   partitioning. No I/O, fully testable in isolation.
//! - **[`io`]**: Config loading, dataset loading, output writers.
//!
//! Honeypot records are removed before either job looks at the data.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod sitemap;
pub mod split;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
