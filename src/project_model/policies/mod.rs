mod capability_expression;
mod runtime_component_map;

pub use capability_expression::CapabilityExpression;
pub use runtime_component_map::{RuntimeComponentMap, NETCORE_APP_PACKAGE};
