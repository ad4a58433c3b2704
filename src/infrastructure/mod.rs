pub mod config;
pub mod gateways;
pub mod notifiers;
