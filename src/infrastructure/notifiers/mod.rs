use std::sync::Arc;

use reqwest::Client;

use crate::domain::notifier::Notifier;
use crate::infrastructure::config::settings::{Config, NotifierKind};
use crate::infrastructure::notifiers::mailgun_notifier::MailgunNotifier;
use crate::infrastructure::notifiers::postmark_notifier::PostmarkNotifier;

pub mod mailgun_notifier;
pub mod postmark_notifier;

/// Builds the email backend selected by `APP_NOTIFIER`.
pub fn notifier_from_config(config: &Config, http_client: Client) -> Arc<dyn Notifier> {
	match config.notifier {
		NotifierKind::Mailgun => Arc::new(MailgunNotifier::new(
			http_client,
			config.mailgun_api_base.clone(),
			config.mailgun_api_key.clone(),
			config.mailgun_domain.clone(),
		)),
		NotifierKind::Postmark => Arc::new(PostmarkNotifier::new(
			http_client,
			config.postmark_api_base.clone(),
			config.postmark_server_token.clone(),
		)),
	}
}
