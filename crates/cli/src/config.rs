// Copyright 2025 itscheems
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::Path;

use serde::Deserialize;
use zypline_sdk::{ClientConfig, Format, SignatureOrder, config as sdk};

// Logging configuration constants
/// Default log level (can be overridden by RUST_LOG environment variable)
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log directory component name
pub const LOG_COMPONENT_NAME: &str = "cli";

/// Default console output enabled (can be overridden by LOG_TO_CONSOLE environment variable)
pub const DEFAULT_LOG_TO_CONSOLE: bool = false;

/// Prefix of the environment variables read into [`CliConfig`]
/// (e.g. `ZYPLINE_API_ID`, `ZYPLINE_FORMAT`)
pub const ENV_PREFIX: &str = "ZYPLINE";

/// Command line configuration: credentials plus client settings
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct CliConfig {
	pub api_id: String,
	pub api_key: String,
	pub resource_url: String,
	pub verification_url: String,
	pub format: Format,
	pub signature_order: SignatureOrder,
	pub connect_timeout_secs: u64,
	pub request_timeout_secs: Option<u64>,
	pub user_agent: String,
}

impl Default for CliConfig {
	fn default() -> Self {
		Self {
			api_id: String::new(),
			api_key: String::new(),
			resource_url: sdk::DEFAULT_RESOURCE_URL.to_string(),
			verification_url: sdk::DEFAULT_VERIFICATION_URL.to_string(),
			format: Format::default(),
			signature_order: SignatureOrder::default(),
			connect_timeout_secs: sdk::DEFAULT_CONNECT_TIMEOUT_SECS,
			request_timeout_secs: None,
			user_agent: sdk::DEFAULT_USER_AGENT.to_string(),
		}
	}
}

impl CliConfig {
	/// Load configuration from an optional file, then the environment
	///
	/// Environment variables win over the file. A `.env` file in the working
	/// directory is loaded first.
	pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
		dotenv::dotenv().ok();

		let mut builder = config::Config::builder();
		if let Some(path) = path {
			builder = builder.add_source(config::File::from(path));
		}
		let cfg = builder
			.add_source(config::Environment::with_prefix(ENV_PREFIX))
			.build()?;

		cfg.try_deserialize()
	}

	pub fn client_config(&self) -> ClientConfig {
		ClientConfig {
			resource_url: self.resource_url.clone(),
			verification_url: self.verification_url.clone(),
			format: self.format,
			signature_order: self.signature_order,
			connect_timeout_secs: self.connect_timeout_secs,
			request_timeout_secs: self.request_timeout_secs,
			user_agent: self.user_agent.clone(),
		}
	}
}
