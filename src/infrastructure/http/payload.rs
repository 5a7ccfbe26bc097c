//! Wire shapes of the assistant backend and their conversion into domain
//! types. Field names follow the backend verbatim.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entities::document::IndexedDocument;
use crate::domain::entities::finding::ComplianceFinding;
use crate::domain::entities::message::HistoryEntry;
use crate::domain::entities::telemetry::TelemetrySample;
use crate::domain::ports::assistant::EMPTY_REPLY_PLACEHOLDER;
use crate::domain::ports::backend::BackendError;

#[derive(Debug, Deserialize)]
pub(crate) struct MetricsEnvelope {
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(rename = "HVAC_Metrics")]
    metrics: HvacMetrics,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct HvacMetrics {
    power_consumption: PowerConsumption,
    temperature_differential: TemperatureDifferential,
    flow_performance: FlowPerformance,
    energy_consumption: EnergyConsumption,
    operational_metrics: OperationalMetrics,
    system_status: SystemStatus,
}

#[derive(Debug, Deserialize)]
struct PowerConsumption {
    #[serde(rename = "Absolute_Power_W")]
    absolute_power_w: f64,
}

#[derive(Debug, Deserialize)]
struct TemperatureDifferential {
    #[serde(rename = "Delta_Temperature_K")]
    delta_temperature_k: f64,
    #[serde(rename = "Setpoint_Delta_T_K")]
    setpoint_delta_t_k: f64,
    #[serde(rename = "Temperature_1_Remote_K")]
    remote_k: f64,
    #[serde(rename = "Temperature_2_Embedded_K")]
    embedded_k: f64,
}

#[derive(Debug, Deserialize)]
struct FlowPerformance {
    #[serde(rename = "Relative_Flow_Percentage")]
    relative_flow_percentage: f64,
    #[serde(rename = "Absolute_Flow_m3_s", default)]
    absolute_flow_m3_s: Option<f64>,
    #[serde(rename = "Flow_Volume_Total_m3", default)]
    flow_volume_total_m3: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct EnergyConsumption {
    #[serde(rename = "Cooling_Energy_J")]
    cooling_j: f64,
    #[serde(rename = "Heating_Energy_J")]
    heating_j: f64,
}

#[derive(Debug, Deserialize)]
struct OperationalMetrics {
    #[serde(rename = "Operating_Time_h")]
    operating_h: f64,
    #[serde(rename = "Active_Time_h")]
    active_h: f64,
}

#[derive(Debug, Deserialize)]
struct SystemStatus {
    #[serde(rename = "Flow_Signal_Faulty")]
    flow_signal_faulty: bool,
}

impl MetricsEnvelope {
    /// Convert to a sample, stamping it with `received_at` when the backend
    /// sent no timestamp of its own.
    pub(crate) fn into_sample(self, received_at: DateTime<Utc>) -> TelemetrySample {
        let m = self.metrics;
        TelemetrySample {
            timestamp: self
                .timestamp
                .as_deref()
                .and_then(parse_timestamp)
                .unwrap_or(received_at),
            power_w: m.power_consumption.absolute_power_w,
            relative_flow_pct: m.flow_performance.relative_flow_percentage,
            absolute_flow_m3_s: m.flow_performance.absolute_flow_m3_s,
            flow_volume_total_m3: m.flow_performance.flow_volume_total_m3,
            delta_temp_k: m.temperature_differential.delta_temperature_k,
            setpoint_delta_k: m.temperature_differential.setpoint_delta_t_k,
            remote_temp_k: m.temperature_differential.remote_k,
            embedded_temp_k: m.temperature_differential.embedded_k,
            cooling_j: m.energy_consumption.cooling_j,
            heating_j: m.energy_consumption.heating_j,
            operating_h: m.operational_metrics.operating_h,
            active_h: m.operational_metrics.active_h,
            flow_fault: m.system_status.flow_signal_faulty,
        }
    }
}

/// RFC 3339, or a naive ISO-8601 string read as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|t| t.and_utc())
        })
        .ok()
}

/// Decode a telemetry body.
pub(crate) fn decode_sample(
    body: &[u8],
    received_at: DateTime<Utc>,
) -> Result<TelemetrySample, BackendError> {
    serde_json::from_slice::<MetricsEnvelope>(body)
        .map(|envelope| envelope.into_sample(received_at))
        .map_err(|e| BackendError::Decode(format!("telemetry sample: {e}")))
}

#[derive(Debug, Serialize)]
pub(crate) struct ComplianceRequest<'a> {
    pub sensor_data: &'a Value,
}

pub(crate) fn decode_findings(body: &[u8]) -> Result<Vec<ComplianceFinding>, BackendError> {
    serde_json::from_slice(body)
        .map_err(|e| BackendError::Decode(format!("compliance findings: {e}")))
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub query: &'a str,
    pub conversation_history: &'a [HistoryEntry],
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    response: Option<String>,
}

/// Decode a chat reply. A missing or blank `response` is not an error; it
/// reads as the "no response" placeholder.
pub(crate) fn decode_reply(body: &[u8]) -> Result<String, BackendError> {
    let reply: ChatResponse = serde_json::from_slice(body)
        .map_err(|e| BackendError::Decode(format!("chat reply: {e}")))?;
    Ok(reply
        .response
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| EMPTY_REPLY_PLACEHOLDER.to_owned()))
}

#[derive(Debug, Deserialize)]
pub(crate) struct DocumentList {
    #[serde(default)]
    pub documents: Vec<IndexedDocument>,
}
