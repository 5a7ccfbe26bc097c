use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One telemetry reading from the energy valve, as received.
///
/// Samples are never mutated after decoding; the poller replaces its
/// "latest" sample wholesale on every successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    pub timestamp: DateTime<Utc>,
    pub power_w: f64,
    pub relative_flow_pct: f64,
    pub absolute_flow_m3_s: Option<f64>,
    pub flow_volume_total_m3: Option<f64>,
    pub delta_temp_k: f64,
    pub setpoint_delta_k: f64,
    pub remote_temp_k: f64,
    pub embedded_temp_k: f64,
    pub cooling_j: f64,
    pub heating_j: f64,
    pub operating_h: f64,
    pub active_h: f64,
    pub flow_fault: bool,
}

impl TelemetrySample {
    #[must_use]
    pub fn power_kw(&self) -> f64 {
        self.power_w / 1000.0
    }

    #[must_use]
    pub fn cooling_gj(&self) -> f64 {
        self.cooling_j / 1e9
    }

    #[must_use]
    pub fn heating_gj(&self) -> f64 {
        self.heating_j / 1e9
    }

    /// Share of operating time the valve was actively regulating, in `[0, 1]`.
    ///
    /// Returns `0.0` when no operating time has been recorded yet.
    #[must_use]
    pub fn active_ratio(&self) -> f64 {
        if self.operating_h <= 0.0 {
            return 0.0;
        }
        (self.active_h / self.operating_h).clamp(0.0, 1.0)
    }

    /// Chart point for the power window.
    #[must_use]
    pub fn power_point(&self) -> PowerPoint {
        PowerPoint {
            timestamp: self.timestamp,
            kw: self.power_kw(),
        }
    }

    /// Chart point for the flow window, drawn against a fixed setpoint line.
    #[must_use]
    pub fn flow_point(&self, setpoint_pct: f64) -> FlowPoint {
        FlowPoint {
            timestamp: self.timestamp,
            flow_pct: self.relative_flow_pct,
            setpoint_pct,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerPoint {
    pub timestamp: DateTime<Utc>,
    pub kw: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowPoint {
    pub timestamp: DateTime<Utc>,
    pub flow_pct: f64,
    pub setpoint_pct: f64,
}
