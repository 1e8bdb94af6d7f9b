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

//! HTTP transport seam
//!
//! The client composes a fully signed [`HttpRequest`] and hands it to an
//! [`HttpInvoker`]. Connection handling, TLS, timeouts and the user agent
//! belong to the invoker; the client never retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::types::{Method, PairUpload};

/// Multipart field name carrying the uploaded file
pub const UPLOAD_FIELD: &str = "uploadedfile";

/// Error types for the transport layer
#[derive(Debug, Error)]
pub enum TransportError {
	#[error("Failed to set up HTTP client: {0}")]
	Setup(String),
	#[error("Request failed: {0}")]
	Request(String),
	#[error("Failed to read response body: {0}")]
	Body(String),
	#[error("Invalid upload: {0}")]
	Upload(String),
}

/// Request body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
	/// Parameters already travel in the URL
	Empty,
	/// `application/x-www-form-urlencoded`
	Form(Vec<(String, String)>),
	/// `multipart/form-data` with the file under [`UPLOAD_FIELD`]
	Multipart {
		fields: Vec<(String, String)>,
		upload: PairUpload,
	},
}

/// A fully composed request, ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
	pub method: Method,
	pub url: String,
	pub headers: Vec<(String, String)>,
	pub body: RequestBody,
}

impl HttpRequest {
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(k, _)| k.eq_ignore_ascii_case(name))
			.map(|(_, v)| v.as_str())
	}
}

/// Performs the network call for a composed request
///
/// Returns the raw response body. Implementations must be safe to share
/// between concurrent calls.
#[async_trait]
pub trait HttpInvoker: Send + Sync {
	async fn invoke(&self, request: HttpRequest) -> Result<Vec<u8>, TransportError>;
}

/// [`HttpInvoker`] backed by reqwest
#[derive(Debug, Clone)]
pub struct ReqwestInvoker {
	client: reqwest::Client,
}

impl ReqwestInvoker {
	pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
		let mut builder = reqwest::Client::builder()
			.connect_timeout(Duration::from_secs(config.connect_timeout_secs))
			.user_agent(config.user_agent.clone());
		if let Some(secs) = config.request_timeout_secs {
			builder = builder.timeout(Duration::from_secs(secs));
		}

		let client = builder
			.build()
			.map_err(|e| TransportError::Setup(e.to_string()))?;
		Ok(Self { client })
	}
}

impl From<Method> for reqwest::Method {
	fn from(method: Method) -> Self {
		match method {
			Method::Get => reqwest::Method::GET,
			Method::Post => reqwest::Method::POST,
			Method::Put => reqwest::Method::PUT,
			Method::Delete => reqwest::Method::DELETE,
		}
	}
}

#[async_trait]
impl HttpInvoker for ReqwestInvoker {
	async fn invoke(&self, request: HttpRequest) -> Result<Vec<u8>, TransportError> {
		let mut builder = self.client.request(request.method.into(), &request.url);
		for (name, value) in &request.headers {
			builder = builder.header(name.as_str(), value.as_str());
		}

		builder = match request.body {
			RequestBody::Empty => builder,
			RequestBody::Form(fields) => builder.form(&fields),
			RequestBody::Multipart { fields, upload } => {
				let part = Part::bytes(upload.bytes)
					.file_name(upload.file_name)
					.mime_str(&upload.content_type)
					.map_err(|e| TransportError::Upload(e.to_string()))?;
				let form = fields
					.into_iter()
					.fold(Form::new(), |form, (k, v)| form.text(k, v))
					.part(UPLOAD_FIELD, part);
				builder.multipart(form)
			}
		};

		let response = builder
			.send()
			.await
			.map_err(|e| TransportError::Request(e.to_string()))?;

		let status = response.status();
		if status.is_success() {
			debug!(%status, "response received");
		} else {
			// Business errors come back in the body; hand it to the decoder anyway.
			warn!(%status, url = %request.url, "non-success HTTP status");
		}

		let body = response
			.bytes()
			.await
			.map_err(|e| TransportError::Body(e.to_string()))?;
		Ok(body.to_vec())
	}
}
