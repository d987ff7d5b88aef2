use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use clap::Parser;

mod api;
mod config;
mod fetch;

use api::SharedData;
use config::ServerConfig;

/// Main entry point for the server.
///
/// Starts with an empty session registry wrapped in a `Mutex`, and serves
/// training, prediction and generation endpoints with Actix-web.
///
/// # Notes
/// - Binds to `--host`/`--port` (default 127.0.0.1:5000).
/// - Log level follows `RUST_LOG`, `info` by default.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let config = ServerConfig::parse();
	log::info!(
		"PPM prediction API running on {}:{} (max order {})",
		config.host,
		config.port,
		config.max_order
	);

	let shared_data = web::Data::new(Mutex::new(SharedData::default()));
	let shared_config = web::Data::new(config.clone());

	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.wrap(Cors::permissive())
			.app_data(shared_data.clone())
			.app_data(shared_config.clone())
			.configure(api::configure)
	})
		.bind((config.host.as_str(), config.port))?
		.run()
		.await
}
