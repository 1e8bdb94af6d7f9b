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

use serde::{Deserialize, Serialize};

use crate::signing::SignatureOrder;
use crate::types::{Endpoint, Format};

/// Default base URL of the index/destination resource endpoint
pub const DEFAULT_RESOURCE_URL: &str = "http://api.zypline.com/zyp/";

/// Default base URL of the verification endpoint
pub const DEFAULT_VERIFICATION_URL: &str = "http://api.zypline.com/verify/";

/// Default connect timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default user agent sent by the reqwest invoker
pub const DEFAULT_USER_AGENT: &str = concat!("zypline-sdk/", env!("CARGO_PKG_VERSION"));

/// Client configuration
///
/// Plain data: the SDK never reads the environment itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
	/// Resource endpoint (lookup, pair add/delete)
	pub resource_url: String,
	/// Verification endpoint (tokens, verification codes)
	pub verification_url: String,
	/// Response format requested through the `Accept` header
	pub format: Format,
	/// Parameter order used to build the signing string
	pub signature_order: SignatureOrder,
	/// Connect timeout for the reqwest invoker
	pub connect_timeout_secs: u64,
	/// Overall request timeout for the reqwest invoker (none by default)
	pub request_timeout_secs: Option<u64>,
	pub user_agent: String,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			resource_url: DEFAULT_RESOURCE_URL.to_string(),
			verification_url: DEFAULT_VERIFICATION_URL.to_string(),
			format: Format::default(),
			signature_order: SignatureOrder::default(),
			connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
			request_timeout_secs: None,
			user_agent: DEFAULT_USER_AGENT.to_string(),
		}
	}
}

impl ClientConfig {
	pub fn with_format(mut self, format: Format) -> Self {
		self.format = format;
		self
	}

	pub fn with_signature_order(mut self, order: SignatureOrder) -> Self {
		self.signature_order = order;
		self
	}

	/// Base URL for an endpoint family
	pub fn endpoint_url(&self, endpoint: Endpoint) -> &str {
		match endpoint {
			Endpoint::Resource => &self.resource_url,
			Endpoint::Verification => &self.verification_url,
		}
	}
}
