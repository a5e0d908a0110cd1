mod backend;
mod core;
mod observability;
mod ui;

pub use backend::BackendConfig;
pub use self::core::Config;
pub use observability::ObservabilityConfig;
pub use ui::UiConfig;
