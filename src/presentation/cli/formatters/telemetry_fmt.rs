use colored::Colorize;

use crate::application::services::TelemetryView;
use crate::domain::entities::telemetry::{FlowPoint, PowerPoint, TelemetrySample};
use crate::domain::rules::fault::FaultMonitor;
use crate::domain::value_objects::fault_status::FaultStatus;

use super::print_section_header;

#[must_use]
pub fn fault_badge(status: FaultStatus) -> String {
    let label = format!(" {status} ");
    match status {
        FaultStatus::Normal => format!("{}", label.on_green().black().bold()),
        FaultStatus::FlowSignalFault => format!("{}", label.on_red().white().bold()),
    }
}

/// One line per applied poll: `[step] hh:mm:ss  power  flow  ΔT  status`.
#[must_use]
pub fn format_sample_line(step: u64, sample: &TelemetrySample) -> String {
    let status = FaultMonitor::display_status(Some(sample));
    let status = match status {
        FaultStatus::Normal => status.to_string().green(),
        FaultStatus::FlowSignalFault => status.to_string().red().bold(),
    };
    format!(
        "[{step:>4}] {}  {:>8.2} kW  {:>6.1} %  ΔT {:>5.2} K  {status}",
        sample.timestamp.format("%H:%M:%S"),
        sample.power_kw(),
        sample.relative_flow_pct,
        sample.delta_temp_k,
    )
}

/// Compact trend of a window as a row of values, oldest first.
#[must_use]
pub fn power_trend(points: &[PowerPoint]) -> String {
    points
        .iter()
        .map(|p| format!("{:.1}", p.kw))
        .collect::<Vec<_>>()
        .join(" → ")
}

#[must_use]
pub fn flow_trend(points: &[FlowPoint]) -> String {
    points
        .iter()
        .map(|p| {
            let text = format!("{:.1}", p.flow_pct);
            if p.flow_pct < p.setpoint_pct {
                text.yellow().to_string()
            } else {
                text
            }
        })
        .collect::<Vec<_>>()
        .join(" → ")
}

pub fn print_telemetry_view(view: &TelemetryView) {
    print_section_header("\nHVAC Telemetry");
    let status = FaultMonitor::display_status(view.latest.as_ref());
    println!("  Status: {}", fault_badge(status));
    println!("  Next step: {}", view.cursor);

    let Some(latest) = &view.latest else {
        println!("  {}", "No sample received yet".dimmed());
        return;
    };

    println!("  Sampled at:      {}", latest.timestamp.format("%Y-%m-%d %H:%M:%S"));
    println!("  Power:           {:.2} kW", latest.power_kw());
    println!("  Relative flow:   {:.1} %", latest.relative_flow_pct);
    if let Some(abs) = latest.absolute_flow_m3_s {
        println!("  Absolute flow:   {abs:.4} m³/s");
    }
    println!(
        "  ΔT:              {:.2} K (setpoint {:.2} K)",
        latest.delta_temp_k, latest.setpoint_delta_k
    );
    println!(
        "  Temperatures:    remote {:.1} K, embedded {:.1} K",
        latest.remote_temp_k, latest.embedded_temp_k
    );
    println!(
        "  Energy:          cooling {:.2} GJ, heating {:.2} GJ",
        latest.cooling_gj(),
        latest.heating_gj()
    );
    println!(
        "  Active time:     {:.0} h / {:.0} h ({:.0}%)",
        latest.active_h,
        latest.operating_h,
        latest.active_ratio() * 100.0
    );

    print_section_header("\nPower window (kW)");
    println!("  {}", power_trend(&view.power));
    print_section_header("\nFlow window (%)");
    println!("  {}", flow_trend(&view.flow));
}
