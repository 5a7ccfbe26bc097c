pub mod fault;

pub use fault::FaultMonitor;
