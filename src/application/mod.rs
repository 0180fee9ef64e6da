/// Application layer - Data sources, services and use cases
///
/// This layer contains the application logic that orchestrates
/// project model services and coordinates with infrastructure through ports.
pub mod data_sources;
pub mod dto;
pub mod factories;
pub mod read_models;
pub mod services;
pub mod use_cases;
