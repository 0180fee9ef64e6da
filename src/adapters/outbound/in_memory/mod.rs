/// In-memory adapters for hosts without a live project model
mod configured_projects;
mod project_properties;

pub use configured_projects::StaticActiveConfiguredProjects;
pub use project_properties::InMemoryProjectProperties;
