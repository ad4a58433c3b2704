pub mod authorization;
pub mod hold_request;
pub mod notifier;
pub mod payment_gateway;
