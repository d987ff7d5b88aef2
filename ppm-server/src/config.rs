use clap::Parser;

/// Highest context order a model may be trained with.
pub const MAX_ORDER_LIMIT: usize = 16;

/// Longest continuation `/v1/generate` will sample.
pub const MAX_GENERATE_LENGTH: usize = 1000;

/// Parses `--max-order`, rejecting values above [`MAX_ORDER_LIMIT`].
fn parse_max_order(value: &str) -> Result<usize, String> {
	let order: usize = value.parse().map_err(|e| format!("{e}"))?;
	if order > MAX_ORDER_LIMIT {
		return Err(format!("max order must be <= {MAX_ORDER_LIMIT}"));
	}
	Ok(order)
}

/// Server settings, read from the command line or the environment.
#[derive(Parser, Debug, Clone)]
#[command(name = "ppm-server", about = "PPM next-symbol prediction API")]
pub struct ServerConfig {
	/// Address to bind.
	#[arg(long, env = "PPM_HOST", default_value = "127.0.0.1")]
	pub host: String,

	/// Port to bind.
	#[arg(long, env = "PPM_PORT", default_value_t = 5000)]
	pub port: u16,

	/// Maximum context order used when a training request does not set one.
	#[arg(long, env = "PPM_MAX_ORDER", default_value_t = 5, value_parser = parse_max_order)]
	pub max_order: usize,

	/// Number of predictions returned when a request does not set a limit.
	#[arg(long, env = "PPM_DEFAULT_LIMIT", default_value_t = 10)]
	pub default_limit: usize,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			host: "127.0.0.1".to_owned(),
			port: 5000,
			max_order: 5,
			default_limit: 10,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_arguments() {
		let config = ServerConfig::try_parse_from(["ppm-server", "--port", "8080", "--max-order", "3"]).unwrap();
		assert_eq!(config.port, 8080);
		assert_eq!(config.max_order, 3);
		assert_eq!(config.default_limit, 10);
	}

	#[test]
	fn test_max_order_is_bounded() {
		let limit = MAX_ORDER_LIMIT.to_string();
		let config = ServerConfig::try_parse_from(["ppm-server", "--max-order", limit.as_str()]).unwrap();
		assert_eq!(config.max_order, MAX_ORDER_LIMIT);

		let above = (MAX_ORDER_LIMIT + 1).to_string();
		assert!(ServerConfig::try_parse_from(["ppm-server", "--max-order", above.as_str()]).is_err());
		assert!(ServerConfig::try_parse_from(["ppm-server", "--max-order", "1000000"]).is_err());
	}
}
