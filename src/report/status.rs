//! Health status enumeration

use std::fmt;

/// Severity-ordered health status
///
/// The ordering is part of the public contract: `Healthy < Degraded <
/// Unhealthy`, so the aggregate status of a report is simply the maximum
/// over its entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The probe target is fully operational
    Healthy,
    /// The probe target works but with reduced capability or headroom
    Degraded,
    /// The probe target is not operational
    Unhealthy,
}

impl Status {
    /// Stable lowercase name, matching the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Healthy => "healthy",
            Status::Degraded => "degraded",
            Status::Unhealthy => "unhealthy",
        }
    }

    /// Whether a workload with this status should keep receiving traffic
    ///
    /// Degraded still serves; only Unhealthy takes a workload out of rotation.
    pub fn is_serving(&self) -> bool {
        matches!(self, Status::Healthy | Status::Degraded)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
