use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::authorization::{Authorization, HoldIntent};
use crate::domain::payment_gateway::{GatewayError, PaymentGateway};

#[derive(Debug, Deserialize)]
struct PaymentIntentResponse {
	id:            Option<String>,
	client_secret: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
	error: StripeErrorDetails,
}

#[derive(Debug, Deserialize, Default)]
struct StripeErrorDetails {
	message:    Option<String>,
	#[serde(rename = "type")]
	error_type: Option<String>,
	code:       Option<String>,
}

/// Creates manual-capture PaymentIntents through Stripe's REST API.
#[derive(Clone)]
pub struct StripePaymentGateway {
	http_client: Client,
	api_base:    String,
	secret_key:  Option<String>,
}

impl StripePaymentGateway {
	pub fn new(
		http_client: Client,
		api_base: impl Into<String>,
		secret_key: Option<String>,
	) -> Self {
		Self {
			http_client,
			api_base: api_base.into(),
			secret_key,
		}
	}

	fn secret_key(&self) -> Option<&str> {
		self.secret_key
			.as_deref()
			.map(str::trim)
			.filter(|key| !key.is_empty())
	}

	/// Stripe takes form-encoded bodies with bracketed metadata keys.
	fn form_fields(intent: &HoldIntent) -> Vec<(String, String)> {
		let mut fields = vec![
			("amount".to_string(), intent.amount_minor_units.to_string()),
			("currency".to_string(), intent.currency.clone()),
			(
				"capture_method".to_string(),
				intent.capture_method.as_str().to_string(),
			),
			("description".to_string(), intent.description.clone()),
		];
		fields.extend(
			intent
				.metadata
				.iter()
				.map(|(label, value)| (format!("metadata[{label}]"), value.clone())),
		);
		fields
	}
}

#[async_trait]
impl PaymentGateway for StripePaymentGateway {
	fn is_configured(&self) -> bool {
		self.secret_key().is_some()
	}

	async fn create_hold(
		&self,
		intent: &HoldIntent,
	) -> Result<Authorization, GatewayError> {
		let secret_key = self.secret_key().ok_or(GatewayError::NotConfigured)?;

		let response = self
			.http_client
			.post(format!(
				"{}/v1/payment_intents",
				self.api_base.trim_end_matches('/')
			))
			.bearer_auth(secret_key)
			.form(&Self::form_fields(intent))
			.send()
			.await
			.map_err(|e| GatewayError::Transport {
				message: e.to_string(),
			})?;

		let status = response.status();
		let body = response.text().await.map_err(|e| GatewayError::Transport {
			message: e.to_string(),
		})?;

		if !status.is_success() {
			let details = serde_json::from_str::<StripeErrorResponse>(&body)
				.map(|response| response.error)
				.unwrap_or_default();
			debug!(
				"Stripe rejected payment intent with {status} (type: {}, code: {})",
				details.error_type.as_deref().unwrap_or("-"),
				details.code.as_deref().unwrap_or("-")
			);

			let message = details
				.message
				.unwrap_or_else(|| format!("Payment provider returned {status}"));
			return Err(GatewayError::Rejected {
				status: status.as_u16(),
				message,
			});
		}

		let intent_response: PaymentIntentResponse = serde_json::from_str(&body)
			.map_err(|e| GatewayError::MalformedResponse {
				message: e.to_string(),
			})?;

		let client_secret =
			intent_response
				.client_secret
				.ok_or_else(|| GatewayError::MalformedResponse {
					message: "payment intent has no client_secret".to_string(),
				})?;

		Ok(Authorization {
			client_secret,
			intent_id: intent_response.id,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::domain::authorization::CaptureMethod;

	#[test]
	fn test_form_fields() {
		let intent = HoldIntent {
			amount_minor_units: 2550,
			currency:           "cad".to_string(),
			capture_method:     CaptureMethod::Manual,
			description:        "Hotline Service Hold".to_string(),
			metadata:           vec![
				("First Name".to_string(), "Jane".to_string()),
				("Issue".to_string(), String::new()),
			],
		};

		let fields = StripePaymentGateway::form_fields(&intent);

		assert_eq!(fields, vec![
			("amount".to_string(), "2550".to_string()),
			("currency".to_string(), "cad".to_string()),
			("capture_method".to_string(), "manual".to_string()),
			("description".to_string(), "Hotline Service Hold".to_string()),
			("metadata[First Name]".to_string(), "Jane".to_string()),
			("metadata[Issue]".to_string(), String::new()),
		]);
	}

	#[test]
	fn test_blank_secret_key_is_not_configured() {
		let gateway = StripePaymentGateway::new(
			Client::new(),
			"https://api.stripe.com",
			Some("  ".to_string()),
		);
		assert!(!gateway.is_configured());

		let gateway =
			StripePaymentGateway::new(Client::new(), "https://api.stripe.com", None);
		assert!(!gateway.is_configured());

		let gateway = StripePaymentGateway::new(
			Client::new(),
			"https://api.stripe.com",
			Some("sk_test_123".to_string()),
		);
		assert!(gateway.is_configured());
	}
}
