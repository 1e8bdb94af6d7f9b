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

//! Response decoding
//!
//! The service answers in JSON or XML depending on the `Accept` header.
//! Both decoders read the same [`Field`](crate::types::Field) location
//! table and therefore always produce the same [`ResultRecord`] shape.
//!
//! - Empty bodies, and a JSON `null` document, decode to an all-unset record.
//! - Missing sub-objects, elements or attributes leave fields unset.
//! - Only a body that cannot be parsed at all is an error.

mod fields;
mod json;
mod xml;

use thiserror::Error;
use tracing::debug;

use crate::types::{Format, ResultRecord};
pub use json::JsonDecoder;
pub use xml::XmlDecoder;

/// Error types for response decoding
#[derive(Debug, Error)]
pub enum DecodeError {
	#[error("Response body is empty")]
	Empty,
	#[error("Malformed {format} response: {reason}")]
	Malformed { format: Format, reason: String },
}

impl DecodeError {
	pub(crate) fn malformed(format: Format, reason: impl ToString) -> Self {
		DecodeError::Malformed {
			format,
			reason: reason.to_string(),
		}
	}
}

/// A wire format decoder
pub trait ResponseDecoder {
	/// Decode a non-empty UTF-8 body
	///
	/// A document that parses but carries no content (JSON `null`) yields
	/// [`DecodeError::Empty`].
	fn decode_body(&self, body: &str) -> Result<ResultRecord, DecodeError>;
}

impl Format {
	/// Decoder for this format
	pub fn decoder(&self) -> &'static dyn ResponseDecoder {
		match self {
			Format::Json => &JsonDecoder,
			Format::Xml => &XmlDecoder,
		}
	}
}

/// Decode a response body, absorbing empty bodies into an all-unset record
pub fn decode(raw: &[u8], format: Format) -> Result<ResultRecord, DecodeError> {
	match decode_strict(raw, format) {
		Err(DecodeError::Empty) => {
			debug!(%format, "empty response body");
			Ok(ResultRecord::default())
		}
		other => other,
	}
}

/// Decode a response body, reporting empty bodies as [`DecodeError::Empty`]
pub fn decode_strict(raw: &[u8], format: Format) -> Result<ResultRecord, DecodeError> {
	let body = std::str::from_utf8(raw).map_err(|e| DecodeError::malformed(format, e))?;
	if body.trim().is_empty() {
		return Err(DecodeError::Empty);
	}

	let record = format.decoder().decode_body(body)?;
	debug!(
		%format,
		populated = record.populated().count(),
		"decoded response"
	);
	Ok(record)
}
