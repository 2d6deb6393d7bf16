//! Prometheus counters for cache and provider activity.

use metrics::counter;
use weather_common::QueryType;

pub fn record_cache_hit(query_type: QueryType) {
    counter!("weather_cache_hits_total", "query" => query_type.kind()).increment(1);
}

pub fn record_cache_miss(query_type: QueryType) {
    counter!("weather_cache_misses_total", "query" => query_type.kind()).increment(1);
}

pub fn record_provider_failure(query_type: QueryType) {
    counter!("weather_provider_failures_total", "query" => query_type.kind()).increment(1);
}

pub fn record_entries_swept(removed: u64) {
    counter!("weather_cache_entries_swept_total").increment(removed);
}
