pub mod check_state;
pub mod compliance_status;
pub mod fault_status;
pub mod step_cursor;

pub use check_state::CheckState;
pub use compliance_status::ComplianceStatus;
pub use fault_status::FaultStatus;
pub use step_cursor::StepCursor;
