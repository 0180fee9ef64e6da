/// Inbound ports (Driving ports) - Use case interfaces
///
/// These ports define the interfaces that external adapters (e.g., CLI)
/// use to interact with the application core.
pub mod assets_inspection_port;

pub use assets_inspection_port::AssetsInspectionPort;
