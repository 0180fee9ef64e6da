/// Logging adapters backed by `tracing`
mod fault_handler;

pub use fault_handler::TracingFaultHandler;
