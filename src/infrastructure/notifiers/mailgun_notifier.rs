use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::notifier::{NotificationMessage, Notifier, NotifierError};

#[derive(Debug, Deserialize)]
struct MailgunErrorResponse {
	message: String,
}

/// Sends through Mailgun's messages API with HTTP basic auth.
#[derive(Clone)]
pub struct MailgunNotifier {
	http_client: Client,
	api_base:    String,
	api_key:     Option<String>,
	domain:      Option<String>,
}

impl MailgunNotifier {
	pub fn new(
		http_client: Client,
		api_base: impl Into<String>,
		api_key: Option<String>,
		domain: Option<String>,
	) -> Self {
		Self {
			http_client,
			api_base: api_base.into(),
			api_key,
			domain,
		}
	}

	fn credentials(&self) -> Option<(&str, &str)> {
		let api_key = self.api_key.as_deref().map(str::trim)?;
		let domain = self.domain.as_deref().map(str::trim)?;
		(!api_key.is_empty() && !domain.is_empty()).then_some((api_key, domain))
	}
}

#[async_trait]
impl Notifier for MailgunNotifier {
	fn is_configured(&self) -> bool {
		self.credentials().is_some()
	}

	async fn send(&self, message: &NotificationMessage) -> Result<(), NotifierError> {
		let (api_key, domain) =
			self.credentials().ok_or(NotifierError::NotConfigured)?;

		let mut form = vec![
			("from", message.from.as_str()),
			("to", message.to.as_str()),
			("subject", message.subject.as_str()),
			("text", message.text_body.as_str()),
		];
		if let Some(html) = &message.html_body {
			form.push(("html", html.as_str()));
		}

		let response = self
			.http_client
			.post(format!(
				"{}/v3/{domain}/messages",
				self.api_base.trim_end_matches('/')
			))
			.basic_auth("api", Some(api_key))
			.form(&form)
			.send()
			.await
			.map_err(|e| NotifierError::Transport {
				message: e.to_string(),
			})?;

		let status = response.status();
		if status.is_success() {
			return Ok(());
		}

		let body = response.text().await.unwrap_or_default();
		let message = serde_json::from_str::<MailgunErrorResponse>(&body)
			.map(|error| error.message)
			.unwrap_or(body);
		Err(NotifierError::Rejected {
			status: status.as_u16(),
			message,
		})
	}
}
