// src/config/mod.rs
// Immutable run configuration: built once in main, passed by reference into
// the run entry point. No process-wide state.

/// Admin API version used when none is configured.
pub const API_VERSION_DEFAULT: &str = "2023-10";

/// Product query selecting the print-on-demand vendors whose stock gets
/// migrated.
pub const DEFAULT_PRODUCT_QUERY: &str = "vendor:Inkthreadable OR vendor:Spreadconnect";

/// Canonical destination location.
pub const DEFAULT_TARGET_LOCATION: &str = "Lille Bislett 16";

/// Locations stock is migrated away from, comma-separated.
pub const DEFAULT_SOURCE_LOCATIONS: &str =
    "Multiple locations,Inkthreadable Warehouse,Spreadconnect Warehouse";

#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Store domain, e.g. `example.myshopify.com`.
    pub store_domain: String,
    /// Private app or custom app access token.
    pub access_token: String,
    /// Admin API version segment, e.g. `2023-10`.
    pub api_version: String,
    /// Product search query the catalog scan is filtered by.
    pub product_query: String,
    /// Name of the location all stock converges to.
    pub target_location: String,
    /// Names of the locations stock is migrated away from.
    pub source_locations: Vec<String>,
    /// Products fetched per catalog page.
    pub page_size: u32,
    /// Per-request timeout applied to every Admin API call.
    pub request_timeout_secs: u64,
    /// Log intended changes without issuing any mutation.
    pub dry_run: bool,
}

/// Split a comma-separated location list, dropping empty entries.
pub fn parse_source_locations(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}
