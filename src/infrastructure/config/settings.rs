use std::time::Duration;

use serde::Deserialize;

use crate::use_cases::compose_notifications::NotificationSettings;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotifierKind {
	#[default]
	Mailgun,
	Postmark,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
	#[serde(default = "default_server_host")]
	pub server_host:           String,
	#[serde(default = "default_server_port")]
	pub server_port:           u16,
	#[serde(default = "default_server_keepalive")]
	pub server_keepalive:      u64,
	/// Comma-separated origins allowed to read responses cross-origin.
	#[serde(default = "default_allowed_origins")]
	pub allowed_origins:       String,
	#[serde(default = "default_cors_max_age")]
	pub cors_max_age:          u64,
	#[serde(default = "default_outbound_timeout_secs")]
	pub outbound_timeout_secs: u64,
	#[serde(default = "default_max_payload_bytes")]
	pub max_payload_bytes:     usize,

	pub stripe_secret_key: Option<String>,
	#[serde(default = "default_stripe_api_base")]
	pub stripe_api_base:   String,

	#[serde(default)]
	pub notifier:              NotifierKind,
	pub mailgun_api_key:       Option<String>,
	pub mailgun_domain:        Option<String>,
	#[serde(default = "default_mailgun_api_base")]
	pub mailgun_api_base:      String,
	pub postmark_server_token: Option<String>,
	#[serde(default = "default_postmark_api_base")]
	pub postmark_api_base:     String,

	#[serde(default = "default_notification_from")]
	pub notification_from: String,
	pub admin_email:       String,
	pub hotline_phone:     String,
}

fn default_server_host() -> String {
	"0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
	8080
}

fn default_server_keepalive() -> u64 {
	75
}

fn default_allowed_origins() -> String {
	"https://www.facilitynetwork.com".to_string()
}

fn default_cors_max_age() -> u64 {
	3600
}

fn default_outbound_timeout_secs() -> u64 {
	5
}

fn default_max_payload_bytes() -> usize {
	10 * 1024 * 1024
}

fn default_stripe_api_base() -> String {
	"https://api.stripe.com".to_string()
}

fn default_mailgun_api_base() -> String {
	"https://api.mailgun.net".to_string()
}

fn default_postmark_api_base() -> String {
	"https://api.postmarkapp.com".to_string()
}

fn default_notification_from() -> String {
	"no-reply@clientsdevsite.com".to_string()
}

impl Config {
	pub fn load() -> Result<Self, config::ConfigError> {
		Self::from_environment(config::Environment::with_prefix("APP"))
	}

	fn from_environment(
		environment: config::Environment,
	) -> Result<Self, config::ConfigError> {
		let config_builder = config::Config::builder()
			.add_source(environment)
			.build()?;

		config_builder.try_deserialize()
	}

	pub fn allowed_origins(&self) -> Vec<String> {
		self.allowed_origins
			.split(',')
			.map(|origin| origin.trim().trim_end_matches('/'))
			.filter(|origin| !origin.is_empty())
			.map(str::to_string)
			.collect()
	}

	pub fn outbound_timeout(&self) -> Duration {
		Duration::from_secs(self.outbound_timeout_secs)
	}

	pub fn notification_settings(&self) -> NotificationSettings {
		NotificationSettings {
			from:            self.notification_from.clone(),
			admin_recipient: self.admin_email.clone(),
			hotline_phone:   self.hotline_phone.clone(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn load_with(vars: &[(&str, &str)]) -> Result<Config, config::ConfigError> {
		let source = vars
			.iter()
			.map(|(key, value)| (key.to_string(), value.to_string()))
			.collect();

		Config::from_environment(
			config::Environment::with_prefix("APP").source(Some(source)),
		)
	}

	#[test]
	fn test_config_load() {
		let config = load_with(&[
			("APP_SERVER_PORT", "9999"),
			("APP_SERVER_KEEPALIVE", "120"),
			("APP_MAX_PAYLOAD_BYTES", "2048"),
			("APP_ALLOWED_ORIGINS", "https://a.example, https://b.example/"),
			("APP_STRIPE_SECRET_KEY", "sk_test_123"),
			("APP_NOTIFIER", "postmark"),
			("APP_POSTMARK_SERVER_TOKEN", "pm-token"),
			("APP_ADMIN_EMAIL", "dispatch@hotline.test"),
			("APP_HOTLINE_PHONE", "1-800-555-0199"),
		])
		.expect("Failed to load config in test");

		assert_eq!(config.server_port, 9999);
		assert_eq!(config.server_keepalive, 120);
		assert_eq!(config.max_payload_bytes, 2048);
		assert_eq!(config.allowed_origins(), vec![
			"https://a.example".to_string(),
			"https://b.example".to_string()
		]);
		assert_eq!(config.stripe_secret_key, Some("sk_test_123".to_string()));
		assert_eq!(config.notifier, NotifierKind::Postmark);
		assert_eq!(config.postmark_server_token, Some("pm-token".to_string()));
		assert_eq!(config.admin_email, "dispatch@hotline.test");
		assert_eq!(config.hotline_phone, "1-800-555-0199");
	}

	#[test]
	fn test_config_defaults() {
		let config = load_with(&[
			("APP_ADMIN_EMAIL", "dispatch@hotline.test"),
			("APP_HOTLINE_PHONE", "1-800-555-0199"),
		])
		.expect("Failed to load config in test");

		assert_eq!(config.server_host, "0.0.0.0");
		assert_eq!(config.server_port, 8080);
		assert_eq!(config.allowed_origins(), vec![
			"https://www.facilitynetwork.com".to_string()
		]);
		assert_eq!(config.outbound_timeout(), Duration::from_secs(5));
		assert_eq!(config.max_payload_bytes, 10 * 1024 * 1024);
		assert_eq!(config.stripe_api_base, "https://api.stripe.com");
		assert_eq!(config.stripe_secret_key, None);
		assert_eq!(config.notifier, NotifierKind::Mailgun);
		assert_eq!(config.mailgun_api_key, None);
		assert_eq!(config.notification_from, "no-reply@clientsdevsite.com");

		let settings = config.notification_settings();
		assert_eq!(settings.admin_recipient, "dispatch@hotline.test");
		assert_eq!(settings.hotline_phone, "1-800-555-0199");
	}

	#[test]
	fn test_config_requires_admin_email() {
		let result = load_with(&[("APP_HOTLINE_PHONE", "1-800-555-0199")]);
		assert!(result.is_err());
	}
}
