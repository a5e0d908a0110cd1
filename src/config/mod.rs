pub mod schema;

pub use schema::{BackendConfig, Config, ObservabilityConfig, UiConfig};
