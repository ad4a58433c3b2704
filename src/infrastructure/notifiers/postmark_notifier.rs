use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::notifier::{NotificationMessage, Notifier, NotifierError};

const MESSAGE_STREAM: &str = "outbound";

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct PostmarkEmail<'a> {
	from:           &'a str,
	to:             &'a str,
	subject:        &'a str,
	text_body:      &'a str,
	#[serde(skip_serializing_if = "Option::is_none")]
	html_body:      Option<&'a str>,
	message_stream: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PostmarkErrorResponse {
	error_code: i64,
	message:    String,
}

/// Sends through Postmark's single-email API.
#[derive(Clone)]
pub struct PostmarkNotifier {
	http_client:  Client,
	api_base:     String,
	server_token: Option<String>,
}

impl PostmarkNotifier {
	pub fn new(
		http_client: Client,
		api_base: impl Into<String>,
		server_token: Option<String>,
	) -> Self {
		Self {
			http_client,
			api_base: api_base.into(),
			server_token,
		}
	}

	fn server_token(&self) -> Option<&str> {
		self.server_token
			.as_deref()
			.map(str::trim)
			.filter(|token| !token.is_empty())
	}
}

#[async_trait]
impl Notifier for PostmarkNotifier {
	fn is_configured(&self) -> bool {
		self.server_token().is_some()
	}

	async fn send(&self, message: &NotificationMessage) -> Result<(), NotifierError> {
		let server_token =
			self.server_token().ok_or(NotifierError::NotConfigured)?;

		let email = PostmarkEmail {
			from:           &message.from,
			to:             &message.to,
			subject:        &message.subject,
			text_body:      &message.text_body,
			html_body:      message.html_body.as_deref(),
			message_stream: MESSAGE_STREAM,
		};

		let response = self
			.http_client
			.post(format!("{}/email", self.api_base.trim_end_matches('/')))
			.header("Accept", "application/json")
			.header("X-Postmark-Server-Token", server_token)
			.json(&email)
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
		let message = serde_json::from_str::<PostmarkErrorResponse>(&body)
			.map(|error| format!("{} (code {})", error.message, error.error_code))
			.unwrap_or(body);
		Err(NotifierError::Rejected {
			status: status.as_u16(),
			message,
		})
	}
}
