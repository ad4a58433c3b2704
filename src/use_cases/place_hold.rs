use std::sync::Arc;

use derive_more::derive::{Display, Error, From};
use log::{error, info, warn};
use uuid::Uuid;

use crate::domain::authorization::{Authorization, HoldIntent};
use crate::domain::hold_request::{HoldAmount, HoldRequest, InvalidAmount};
use crate::domain::notifier::{NotificationMessage, Notifier};
use crate::domain::payment_gateway::{GatewayError, PaymentGateway};
use crate::use_cases::compose_notifications::NotificationComposer;

#[derive(Debug, Display, Error, From, Clone, PartialEq, Eq)]
pub enum PlaceHoldError {
	#[display("{_0}")]
	InvalidAmount(InvalidAmount),
	#[display("Missing API keys")]
	#[from(ignore)]
	MissingCredentials,
	#[display("{_0}")]
	PaymentProvider(GatewayError),
}

/// Validates a hotline request, authorizes the hold and sends the
/// notifications.
///
/// Once the hold is authorized the request has succeeded: notification
/// failures are logged and otherwise ignored.
#[derive(Clone)]
pub struct PlaceHoldUseCase {
	gateway:  Arc<dyn PaymentGateway>,
	notifier: Arc<dyn Notifier>,
	composer: NotificationComposer,
}

impl PlaceHoldUseCase {
	pub fn new(
		gateway: Arc<dyn PaymentGateway>,
		notifier: Arc<dyn Notifier>,
		composer: NotificationComposer,
	) -> Self {
		Self {
			gateway,
			notifier,
			composer,
		}
	}

	pub async fn execute(
		&self,
		request: HoldRequest,
	) -> Result<Authorization, PlaceHoldError> {
		let request_id = Uuid::new_v4();

		let amount = request.hold_amount().inspect_err(|_| {
			info!("Hold request {request_id} rejected: invalid or missing amount");
		})?;

		if !self.gateway.is_configured() || !self.notifier.is_configured() {
			error!("Hold request {request_id} aborted: provider credentials missing");
			return Err(PlaceHoldError::MissingCredentials);
		}

		let intent = HoldIntent::for_request(&amount, &request);
		let authorization =
			self.gateway.create_hold(&intent).await.inspect_err(|e| {
				error!("Hold request {request_id} authorization failed: {e:?}");
			})?;

		info!(
			"Hold request {request_id} authorized {} {} as {}",
			intent.amount_minor_units,
			intent.currency,
			authorization.intent_id.as_deref().unwrap_or("<unknown intent>")
		);

		self.notify(request_id, &request, &amount).await;

		Ok(authorization)
	}

	async fn notify(
		&self,
		request_id: Uuid,
		request: &HoldRequest,
		amount: &HoldAmount,
	) {
		match self.composer.admin_notification(request, amount) {
			Ok(message) => self.deliver(request_id, "admin", &message).await,
			Err(e) => {
				warn!("Hold request {request_id}: failed to render admin email: {e}")
			}
		}

		let Some(recipient) = request.contact_email() else {
			return;
		};

		match self.composer.confirmation(request, amount, recipient) {
			Ok(message) => self.deliver(request_id, "confirmation", &message).await,
			Err(e) => warn!(
				"Hold request {request_id}: failed to render confirmation email: {e}"
			),
		}
	}

	async fn deliver(
		&self,
		request_id: Uuid,
		kind: &str,
		message: &NotificationMessage,
	) {
		match self.notifier.send(message).await {
			Ok(()) => info!("Hold request {request_id}: {kind} email sent"),
			Err(e) => {
				warn!("Hold request {request_id}: {kind} email not delivered: {e}")
			}
		}
	}
}
