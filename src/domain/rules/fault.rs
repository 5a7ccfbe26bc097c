use crate::domain::entities::telemetry::TelemetrySample;
use crate::domain::value_objects::fault_status::FaultStatus;

/// Derives the flow-signal alarm from the latest sample.
///
/// The flag is passed through verbatim: no smoothing, no hysteresis. One
/// faulty sample raises the alarm and one clean sample clears it.
#[derive(Debug, Clone, Copy, Default)]
pub struct FaultMonitor;

impl FaultMonitor {
    #[must_use]
    pub const fn status(sample: &TelemetrySample) -> bool {
        sample.flow_fault
    }

    /// Status of an optional latest sample; no sample yet reads as normal.
    #[must_use]
    pub fn display_status(sample: Option<&TelemetrySample>) -> FaultStatus {
        FaultStatus::from(sample.is_some_and(Self::status))
    }
}
