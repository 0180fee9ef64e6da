/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the project model isolated.
mod inspect_request;
mod inspect_response;
mod output_format;

pub use inspect_request::InspectRequest;
pub use inspect_response::InspectResponse;
pub use output_format::OutputFormat;
