//! Request health snapshot shown on the monitoring dashboard.

use serde::Serialize;

use crate::domain::foundation::Timestamp;

/// Error rate above which the service reports itself degraded.
pub const DEGRADED_ERROR_RATE: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Online,
    Degraded,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResponseTimes {
    pub avg: u64,
    pub min: u64,
    pub max: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub status: ServiceStatus,
    /// Seconds since start.
    pub uptime: u64,
    pub request_count: u64,
    pub error_count: u64,
    pub error_rate: f64,
    /// Milliseconds.
    pub response_time: ResponseTimes,
    pub timestamp: Timestamp,
}

impl MetricsSnapshot {
    pub fn new(
        uptime: u64,
        request_count: u64,
        error_count: u64,
        total_ms: u64,
        min_ms: u64,
        max_ms: u64,
        now: Timestamp,
    ) -> Self {
        let error_rate = if request_count == 0 {
            0.0
        } else {
            error_count as f64 / request_count as f64
        };
        let avg = if request_count == 0 { 0 } else { total_ms / request_count };
        let status = if error_rate > DEGRADED_ERROR_RATE {
            ServiceStatus::Degraded
        } else {
            ServiceStatus::Online
        };
        Self {
            status,
            uptime,
            request_count,
            error_count,
            error_rate,
            response_time: ResponseTimes {
                avg,
                min: if request_count == 0 { 0 } else { min_ms },
                max: max_ms,
            },
            timestamp: now,
        }
    }
}
