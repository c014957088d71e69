//! Engine metrics.
//!
//! # Metrics
//! - `route_sync_queries_total` (counter): queries by `path` (sync, async)
//! - `route_sync_deferred_resolutions_total` (counter): producers actually started
//! - `route_sync_flattened_routes` (histogram): leaf count per flatten
//! - `route_sync_registry_cache_total` (counter): registry lookups by `outcome` (hit, miss)

pub fn record_query(path: &'static str) {
    ::metrics::counter!("route_sync_queries_total", "path" => path).increment(1);
}

pub fn record_deferred_resolution() {
    ::metrics::counter!("route_sync_deferred_resolutions_total").increment(1);
}

pub fn record_flattened(count: usize) {
    ::metrics::histogram!("route_sync_flattened_routes").record(count as f64);
}

pub fn record_registry_cache(hit: bool) {
    let outcome = if hit { "hit" } else { "miss" };
    ::metrics::counter!("route_sync_registry_cache_total", "outcome" => outcome).increment(1);
}
