use async_trait::async_trait;
use derive_more::derive::{Display, Error};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
	pub from:      String,
	pub to:        String,
	pub subject:   String,
	pub text_body: String,
	pub html_body: Option<String>,
}

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum NotifierError {
	#[display("Email provider unreachable: {message}")]
	Transport { message: String },
	#[display("Email provider returned {status}: {message}")]
	Rejected { status: u16, message: String },
	#[display("Email provider credentials are not configured")]
	NotConfigured,
}

/// A transactional email backend.
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
	fn is_configured(&self) -> bool;

	async fn send(&self, message: &NotificationMessage) -> Result<(), NotifierError>;
}
