// Copyright 2025 chenjjiaa
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

//! Request signing
//!
//! Every request carries the caller's `api_id` and a `hash` field holding
//! the lowercase hex HMAC-SHA1 of the signing string, keyed with the API
//! key. The signing string is every parameter concatenated as `key` then
//! `value` with no delimiter, skipping:
//!
//! - the keys `hash`, `siteurl` and `uploadedfile`
//! - any parameter whose value is the empty string
//!
//! The server has to rebuild the same string, so the concatenation order
//! is fixed by [`SignatureOrder`] rather than by how the caller happened
//! to build the [`ParamSet`].

use std::fmt;

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha1::Sha1;

use crate::params::ParamSet;

type HmacSha1 = Hmac<Sha1>;

/// Parameters that never contribute to the signature
pub const EXCLUDED_KEYS: [&str; 3] = ["hash", "siteurl", "uploadedfile"];

/// Key under which the caller identity is transmitted
pub const API_ID_KEY: &str = "api_id";

/// Key under which the signature is transmitted
pub const HASH_KEY: &str = "hash";

/// Error types for signing operations
#[derive(Debug, thiserror::Error)]
pub enum SigningError {
	#[error("API id must not be empty")]
	MissingApiId,
	#[error("API key must not be empty")]
	MissingApiKey,
	#[error("Invalid signing key: {0}")]
	InvalidKey(String),
}

/// Order in which surviving parameters are concatenated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureOrder {
	/// Ascending byte order of the keys. Independent of how the set was built.
	#[default]
	Sorted,
	/// Insertion order of the [`ParamSet`] followed by `api_id`, the string
	/// legacy servers rebuild
	Insertion,
}

/// Shared API credential pair, immutable for the lifetime of a client
#[derive(Clone)]
pub struct Credentials {
	api_id: String,
	api_key: String,
}

impl Credentials {
	/// Create credentials, rejecting empty values
	pub fn new(api_id: impl Into<String>, api_key: impl Into<String>) -> Result<Self, SigningError> {
		let api_id = api_id.into();
		let api_key = api_key.into();
		if api_id.is_empty() {
			return Err(SigningError::MissingApiId);
		}
		if api_key.is_empty() {
			return Err(SigningError::MissingApiKey);
		}
		Ok(Self { api_id, api_key })
	}

	pub fn api_id(&self) -> &str {
		&self.api_id
	}
}

impl fmt::Debug for Credentials {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Credentials")
			.field("api_id", &self.api_id)
			.field("api_key", &"<redacted>")
			.finish()
	}
}

/// A parameter set augmented with the caller identity and its signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
	params: ParamSet,
	api_id: String,
	hash: String,
}

impl SignedRequest {
	/// The caller's parameters as they were signed
	pub fn params(&self) -> &ParamSet {
		&self.params
	}

	pub fn api_id(&self) -> &str {
		&self.api_id
	}

	pub fn hash(&self) -> &str {
		&self.hash
	}

	/// Full transmittable parameter list: params, then `api_id`, then `hash`
	pub fn pairs(&self) -> Vec<(String, String)> {
		let mut full = self.params.clone();
		full.insert(API_ID_KEY, self.api_id.clone());
		full.insert(HASH_KEY, self.hash.clone());
		full.into_pairs()
	}
}

/// Signs parameter sets with a fixed credential pair
#[derive(Debug, Clone)]
pub struct RequestSigner {
	credentials: Credentials,
	order: SignatureOrder,
}

impl RequestSigner {
	pub fn new(credentials: Credentials, order: SignatureOrder) -> Self {
		Self { credentials, order }
	}

	pub fn credentials(&self) -> &Credentials {
		&self.credentials
	}

	pub fn order(&self) -> SignatureOrder {
		self.order
	}

	/// The exact string hashed when signing `params`
	///
	/// In [`SignatureOrder::Insertion`] mode `api_id` is merged into the
	/// parameters before signing; an existing `api_id` entry keeps its position.
	pub fn preimage(&self, params: &ParamSet) -> String {
		match self.order {
			SignatureOrder::Sorted => signing_string(params, self.order),
			SignatureOrder::Insertion => {
				let merged = params
					.clone()
					.with(API_ID_KEY, self.credentials.api_id.as_str());
				signing_string(&merged, self.order)
			}
		}
	}

	/// Sign a parameter set
	///
	/// Pure function of the params and the credentials.
	pub fn sign(&self, params: ParamSet) -> Result<SignedRequest, SigningError> {
		let hash = hmac_sha1_hex(
			self.credentials.api_key.as_bytes(),
			self.preimage(&params).as_bytes(),
		)?;
		Ok(SignedRequest {
			params,
			api_id: self.credentials.api_id.clone(),
			hash,
		})
	}
}

/// Whether a parameter contributes to the signature
fn is_signed(key: &str, value: &str) -> bool {
	!value.is_empty() && !EXCLUDED_KEYS.contains(&key)
}

/// Build the string that gets signed
pub fn signing_string(params: &ParamSet, order: SignatureOrder) -> String {
	let mut entries: Vec<(&str, &str)> = params.iter().filter(|(k, v)| is_signed(k, v)).collect();
	if order == SignatureOrder::Sorted {
		entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
	}

	entries.into_iter().fold(String::new(), |mut acc, (k, v)| {
		acc.push_str(k);
		acc.push_str(v);
		acc
	})
}

/// Compute the hex HMAC-SHA1 signature of a parameter set
///
/// An empty signing string is still hashed.
pub fn compute_hash(
	params: &ParamSet,
	secret: &str,
	order: SignatureOrder,
) -> Result<String, SigningError> {
	hmac_sha1_hex(secret.as_bytes(), signing_string(params, order).as_bytes())
}

fn hmac_sha1_hex(key: &[u8], data: &[u8]) -> Result<String, SigningError> {
	let mut mac =
		HmacSha1::new_from_slice(key).map_err(|e| SigningError::InvalidKey(e.to_string()))?;
	mac.update(data);
	Ok(hex::encode(mac.finalize().into_bytes()))
}
