use async_trait::async_trait;
use derive_more::derive::{Display, Error};

use crate::domain::authorization::{Authorization, HoldIntent};

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
	/// The provider could not be reached or did not answer in time.
	#[display("{message}")]
	Transport { message: String },
	/// The provider answered with an error; `message` is its own wording.
	#[display("{message}")]
	Rejected { status: u16, message: String },
	#[display("Payment provider credentials are not configured")]
	NotConfigured,
	#[display("Unexpected response from payment provider: {message}")]
	MalformedResponse { message: String },
}

#[async_trait]
pub trait PaymentGateway: Send + Sync + 'static {
	/// Whether the credentials needed to call the provider are present.
	fn is_configured(&self) -> bool;

	async fn create_hold(
		&self,
		intent: &HoldIntent,
	) -> Result<Authorization, GatewayError>;
}
