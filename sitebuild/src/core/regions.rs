//! US state and federal district codes used to partition pilots.

/// The 50 states plus DC.
pub const VALID_REGIONS: [&str; 51] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA", "KS",
    "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM", "NY",
    "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA", "WV",
    "WI", "WY", "DC",
];

/// Uppercase `raw` and return it if it names a valid region.
pub fn normalize_region(raw: &str) -> Option<String> {
    let code = raw.to_uppercase();
    VALID_REGIONS.contains(&code.as_str()).then_some(code)
}

/// Shard file name for a normalized region code.
pub fn shard_file_name(code: &str) -> String {
    format!("pilots-{}.json", code.to_lowercase())
}
