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

use std::{fmt, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

/// Response wire format, chosen once per client
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
	#[default]
	Json,
	Xml,
}

impl Format {
	/// Value sent in the `Accept` header
	pub fn accept_header(&self) -> &'static str {
		match self {
			Format::Json => "application/json",
			Format::Xml => "text/xml",
		}
	}
}

impl fmt::Display for Format {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Format::Json => f.write_str("json"),
			Format::Xml => f.write_str("xml"),
		}
	}
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown format: {0} (expected json or xml)")]
pub struct ParseFormatError(String);

impl FromStr for Format {
	type Err = ParseFormatError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"json" => Ok(Format::Json),
			"xml" => Ok(Format::Xml),
			_ => Err(ParseFormatError(s.to_string())),
		}
	}
}

/// Logical service endpoint family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
	/// Index to destination pairs
	Resource,
	/// Session tokens and verification codes
	Verification,
}

/// HTTP verb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
	Get,
	Post,
	Put,
	Delete,
}

impl Method {
	/// Whether signed parameters travel in the URL query string
	pub fn uses_query(&self) -> bool {
		matches!(self, Method::Get | Method::Delete)
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
			Method::Put => "PUT",
			Method::Delete => "DELETE",
		}
	}
}

impl fmt::Display for Method {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Remote operations offered by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
	GetDestination,
	AddPair,
	DeletePair,
	CheckToken,
	RequestVerification,
	AttemptVerification,
}

impl Operation {
	/// Fixed routing table
	pub const fn route(self) -> (Endpoint, Method) {
		match self {
			Operation::GetDestination => (Endpoint::Resource, Method::Get),
			Operation::AddPair => (Endpoint::Resource, Method::Post),
			Operation::DeletePair => (Endpoint::Resource, Method::Delete),
			Operation::CheckToken => (Endpoint::Verification, Method::Get),
			Operation::RequestVerification => (Endpoint::Verification, Method::Post),
			Operation::AttemptVerification => (Endpoint::Verification, Method::Put),
		}
	}

	pub fn name(&self) -> &'static str {
		match self {
			Operation::GetDestination => "get_destination",
			Operation::AddPair => "add_pair",
			Operation::DeletePair => "delete_pair",
			Operation::CheckToken => "check_token",
			Operation::RequestVerification => "request_verification",
			Operation::AttemptVerification => "attempt_verification",
		}
	}
}

impl fmt::Display for Operation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// File attached to a pair-add request
#[derive(Clone, PartialEq, Eq)]
pub struct PairUpload {
	pub file_name: String,
	pub content_type: String,
	pub bytes: Vec<u8>,
}

impl PairUpload {
	pub fn new(
		file_name: impl Into<String>,
		content_type: impl Into<String>,
		bytes: impl Into<Vec<u8>>,
	) -> Self {
		Self {
			file_name: file_name.into(),
			content_type: content_type.into(),
			bytes: bytes.into(),
		}
	}

	/// Read an upload from disk, naming it after the file's base name
	pub fn from_path(path: impl AsRef<Path>, content_type: impl Into<String>) -> std::io::Result<Self> {
		let path = path.as_ref();
		let bytes = std::fs::read(path)?;
		let file_name = path
			.file_name()
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_default();
		Ok(Self::new(file_name, content_type, bytes))
	}
}

impl fmt::Debug for PairUpload {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PairUpload")
			.field("file_name", &self.file_name)
			.field("content_type", &self.content_type)
			.field("len", &self.bytes.len())
			.finish()
	}
}

/// Names every field of a [`ResultRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
	RawIndex,
	RawCountry,
	RawSuffix,
	RawIp,
	PreppedIndex,
	FriendlyIndex,
	Suffix,
	LocalIndex,
	ContactIndex,
	Navi,
	ShortNavi,
	Url,
	Filename,
	FileType,
	Updated,
	Expiration,
	ThumbsFull,
	ThumbsLarge,
	ThumbsMedium,
	ThumbsSmall,
	Token,
	TokenExpiration,
	TokenBool,
	CountryCode,
	CountryIso,
	CountryName,
	ResultBool,
	ResultDesc,
	ErrorNo,
	ErrorDesc,
}

impl Field {
	pub const ALL: &'static [Field] = &[
		Field::RawIndex,
		Field::RawCountry,
		Field::RawSuffix,
		Field::RawIp,
		Field::PreppedIndex,
		Field::FriendlyIndex,
		Field::Suffix,
		Field::LocalIndex,
		Field::ContactIndex,
		Field::Navi,
		Field::ShortNavi,
		Field::Url,
		Field::Filename,
		Field::FileType,
		Field::Updated,
		Field::Expiration,
		Field::ThumbsFull,
		Field::ThumbsLarge,
		Field::ThumbsMedium,
		Field::ThumbsSmall,
		Field::Token,
		Field::TokenExpiration,
		Field::TokenBool,
		Field::CountryCode,
		Field::CountryIso,
		Field::CountryName,
		Field::ResultBool,
		Field::ResultDesc,
		Field::ErrorNo,
		Field::ErrorDesc,
	];
}

/// Canonical decoded response, identical for both wire formats
///
/// Every field is optional. A field missing from the payload stays `None`.
/// The outcome fields are business data reported by the server; nothing in
/// this crate interprets them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultRecord {
	// Raw input echo
	#[serde(skip_serializing_if = "Option::is_none")]
	pub raw_index: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub raw_country: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub raw_suffix: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub raw_ip: Option<String>,

	// Normalized index forms
	#[serde(skip_serializing_if = "Option::is_none")]
	pub prepped_index: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub friendly_index: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub suffix: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub local_index: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub contact_index: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub navi: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub short_navi: Option<String>,

	// Destination metadata
	#[serde(skip_serializing_if = "Option::is_none")]
	pub url: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub filename: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub file_type: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub updated: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub expiration: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub thumbs_full: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub thumbs_large: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub thumbs_medium: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub thumbs_small: Option<String>,

	// Session token
	#[serde(skip_serializing_if = "Option::is_none")]
	pub token: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub token_expiration: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub token_bool: Option<String>,

	// Country metadata
	#[serde(skip_serializing_if = "Option::is_none")]
	pub country_code: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub country_iso: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub country_name: Option<String>,

	// Outcome
	#[serde(skip_serializing_if = "Option::is_none")]
	pub result_bool: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub result_desc: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error_no: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error_desc: Option<String>,
}

impl ResultRecord {
	pub fn get(&self, field: Field) -> Option<&str> {
		let value = match field {
			Field::RawIndex => &self.raw_index,
			Field::RawCountry => &self.raw_country,
			Field::RawSuffix => &self.raw_suffix,
			Field::RawIp => &self.raw_ip,
			Field::PreppedIndex => &self.prepped_index,
			Field::FriendlyIndex => &self.friendly_index,
			Field::Suffix => &self.suffix,
			Field::LocalIndex => &self.local_index,
			Field::ContactIndex => &self.contact_index,
			Field::Navi => &self.navi,
			Field::ShortNavi => &self.short_navi,
			Field::Url => &self.url,
			Field::Filename => &self.filename,
			Field::FileType => &self.file_type,
			Field::Updated => &self.updated,
			Field::Expiration => &self.expiration,
			Field::ThumbsFull => &self.thumbs_full,
			Field::ThumbsLarge => &self.thumbs_large,
			Field::ThumbsMedium => &self.thumbs_medium,
			Field::ThumbsSmall => &self.thumbs_small,
			Field::Token => &self.token,
			Field::TokenExpiration => &self.token_expiration,
			Field::TokenBool => &self.token_bool,
			Field::CountryCode => &self.country_code,
			Field::CountryIso => &self.country_iso,
			Field::CountryName => &self.country_name,
			Field::ResultBool => &self.result_bool,
			Field::ResultDesc => &self.result_desc,
			Field::ErrorNo => &self.error_no,
			Field::ErrorDesc => &self.error_desc,
		};
		value.as_deref()
	}

	pub fn field_mut(&mut self, field: Field) -> &mut Option<String> {
		match field {
			Field::RawIndex => &mut self.raw_index,
			Field::RawCountry => &mut self.raw_country,
			Field::RawSuffix => &mut self.raw_suffix,
			Field::RawIp => &mut self.raw_ip,
			Field::PreppedIndex => &mut self.prepped_index,
			Field::FriendlyIndex => &mut self.friendly_index,
			Field::Suffix => &mut self.suffix,
			Field::LocalIndex => &mut self.local_index,
			Field::ContactIndex => &mut self.contact_index,
			Field::Navi => &mut self.navi,
			Field::ShortNavi => &mut self.short_navi,
			Field::Url => &mut self.url,
			Field::Filename => &mut self.filename,
			Field::FileType => &mut self.file_type,
			Field::Updated => &mut self.updated,
			Field::Expiration => &mut self.expiration,
			Field::ThumbsFull => &mut self.thumbs_full,
			Field::ThumbsLarge => &mut self.thumbs_large,
			Field::ThumbsMedium => &mut self.thumbs_medium,
			Field::ThumbsSmall => &mut self.thumbs_small,
			Field::Token => &mut self.token,
			Field::TokenExpiration => &mut self.token_expiration,
			Field::TokenBool => &mut self.token_bool,
			Field::CountryCode => &mut self.country_code,
			Field::CountryIso => &mut self.country_iso,
			Field::CountryName => &mut self.country_name,
			Field::ResultBool => &mut self.result_bool,
			Field::ResultDesc => &mut self.result_desc,
			Field::ErrorNo => &mut self.error_no,
			Field::ErrorDesc => &mut self.error_desc,
		}
	}

	/// True when no field is set
	pub fn is_empty(&self) -> bool {
		Field::ALL.iter().all(|field| self.get(*field).is_none())
	}

	/// Populated fields in declaration order
	pub fn populated(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
		Field::ALL
			.iter()
			.filter_map(move |field| self.get(*field).map(|value| (*field, value)))
	}
}

/// Outcome of one API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
	/// Response body exactly as received
	pub raw: Vec<u8>,
	/// Decoded view of `raw`
	pub record: ResultRecord,
}
