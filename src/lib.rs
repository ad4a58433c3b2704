use std::sync::Arc;
use std::time::Duration;

use actix_web::middleware::{Logger, from_fn};
use actix_web::{App, HttpServer, web};
use log::{info, warn};
use reqwest::Client;

use crate::adapters::web::cors::{CorsPolicy, cors};
use crate::adapters::web::hold_handler::{BodyLimit, create_hold};
use crate::domain::payment_gateway::PaymentGateway;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::gateways::stripe_payment_gateway::StripePaymentGateway;
use crate::infrastructure::notifiers::notifier_from_config;
use crate::use_cases::compose_notifications::NotificationComposer;
use crate::use_cases::place_hold::PlaceHoldUseCase;

pub mod adapters;
pub mod domain;
pub mod infrastructure;
pub mod use_cases;

/// Wires the Stripe gateway and the configured email backend into the hold
/// pipeline. Every outbound call shares one client and its timeout.
pub fn place_hold_use_case(config: &Config) -> std::io::Result<PlaceHoldUseCase> {
	let http_client = Client::builder()
		.timeout(config.outbound_timeout())
		.build()
		.map_err(std::io::Error::other)?;

	let gateway = Arc::new(StripePaymentGateway::new(
		http_client.clone(),
		config.stripe_api_base.clone(),
		config.stripe_secret_key.clone(),
	));
	if !gateway.is_configured() {
		warn!("Stripe secret key is not configured, hold requests will fail");
	}

	let notifier = notifier_from_config(config, http_client);
	if !notifier.is_configured() {
		warn!(
			"{:?} credentials are not configured, hold requests will fail",
			config.notifier
		);
	}

	let composer = NotificationComposer::new(config.notification_settings())
		.map_err(std::io::Error::other)?;

	Ok(PlaceHoldUseCase::new(gateway, notifier, composer))
}

pub async fn run(config: Arc<Config>) -> std::io::Result<()> {
	let place_hold_use_case = web::Data::new(place_hold_use_case(&config)?);
	let body_limit = web::Data::new(BodyLimit(config.max_payload_bytes));
	let cors_policy = web::Data::new(CorsPolicy::new(
		config.allowed_origins(),
		config.cors_max_age,
	));

	info!(
		"Starting Actix-Web server on {}:{}...",
		config.server_host, config.server_port
	);
	HttpServer::new(move || {
		App::new()
			.app_data(cors_policy.clone())
			.app_data(body_limit.clone())
			.app_data(place_hold_use_case.clone())
			.wrap(from_fn(cors))
			.wrap(Logger::default())
			.service(create_hold)
	})
	.keep_alive(Duration::from_secs(config.server_keepalive))
	.bind((config.server_host.as_str(), config.server_port))?
	.run()
	.await
}
