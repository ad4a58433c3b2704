use std::sync::Arc;

use hotline_hold::infrastructure::config::settings::Config;
use hotline_hold::run;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(
		env_logger::Env::default().default_filter_or("info"),
	)
	.init();

	let config = Arc::new(Config::load().expect("Failed to load configuration"));
	run(config).await
}
