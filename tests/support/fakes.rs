use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hotline_hold::domain::authorization::{Authorization, HoldIntent};
use hotline_hold::domain::notifier::{
	NotificationMessage, Notifier, NotifierError,
};
use hotline_hold::domain::payment_gateway::{GatewayError, PaymentGateway};
use hotline_hold::use_cases::compose_notifications::{
	NotificationComposer, NotificationSettings,
};
use hotline_hold::use_cases::place_hold::PlaceHoldUseCase;

pub const ADMIN_EMAIL: &str = "dispatch@hotline.test";
pub const HOTLINE_PHONE: &str = "1-800-555-0199";

/// Records every hold it is asked for and answers with a fixed outcome.
pub struct FakeGateway {
	configured: bool,
	outcome:    Result<Authorization, GatewayError>,
	calls:      Mutex<Vec<HoldIntent>>,
}

impl FakeGateway {
	pub fn approving(client_secret: &str) -> Arc<Self> {
		Arc::new(Self {
			configured: true,
			outcome:    Ok(Authorization {
				client_secret: client_secret.to_string(),
				intent_id:     Some("pi_fake".to_string()),
			}),
			calls:      Mutex::new(Vec::new()),
		})
	}

	pub fn failing(error: GatewayError) -> Arc<Self> {
		Arc::new(Self {
			configured: true,
			outcome:    Err(error),
			calls:      Mutex::new(Vec::new()),
		})
	}

	pub fn unconfigured() -> Arc<Self> {
		Arc::new(Self {
			configured: false,
			outcome:    Err(GatewayError::NotConfigured),
			calls:      Mutex::new(Vec::new()),
		})
	}

	pub fn calls(&self) -> Vec<HoldIntent> {
		self.calls.lock().unwrap().clone()
	}
}

#[async_trait]
impl PaymentGateway for FakeGateway {
	fn is_configured(&self) -> bool {
		self.configured
	}

	async fn create_hold(
		&self,
		intent: &HoldIntent,
	) -> Result<Authorization, GatewayError> {
		self.calls.lock().unwrap().push(intent.clone());
		self.outcome.clone()
	}
}

/// Records every message; optionally fails each delivery after recording it.
pub struct FakeNotifier {
	configured: bool,
	failing:    bool,
	sent:       Mutex<Vec<NotificationMessage>>,
}

impl FakeNotifier {
	pub fn working() -> Arc<Self> {
		Arc::new(Self {
			configured: true,
			failing:    false,
			sent:       Mutex::new(Vec::new()),
		})
	}

	pub fn failing() -> Arc<Self> {
		Arc::new(Self {
			configured: true,
			failing:    true,
			sent:       Mutex::new(Vec::new()),
		})
	}

	pub fn unconfigured() -> Arc<Self> {
		Arc::new(Self {
			configured: false,
			failing:    true,
			sent:       Mutex::new(Vec::new()),
		})
	}

	pub fn sent(&self) -> Vec<NotificationMessage> {
		self.sent.lock().unwrap().clone()
	}
}

#[async_trait]
impl Notifier for FakeNotifier {
	fn is_configured(&self) -> bool {
		self.configured
	}

	async fn send(&self, message: &NotificationMessage) -> Result<(), NotifierError> {
		self.sent.lock().unwrap().push(message.clone());
		if self.failing {
			return Err(NotifierError::Rejected {
				status:  503,
				message: "mailbox unavailable".to_string(),
			});
		}
		Ok(())
	}
}

pub fn composer() -> NotificationComposer {
	NotificationComposer::new(NotificationSettings {
		from:            "no-reply@hotline.test".to_string(),
		admin_recipient: ADMIN_EMAIL.to_string(),
		hotline_phone:   HOTLINE_PHONE.to_string(),
	})
	.expect("templates should compile")
}

pub fn place_hold_use_case(
	gateway: Arc<FakeGateway>,
	notifier: Arc<FakeNotifier>,
) -> PlaceHoldUseCase {
	PlaceHoldUseCase::new(gateway, notifier, composer())
}
