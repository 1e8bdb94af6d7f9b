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

use reqwest::Url;
use thiserror::Error;
use tracing::{Instrument, debug, info_span};
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::decode::{DecodeError, decode};
use crate::params::ParamSet;
use crate::signing::{Credentials, RequestSigner, SigningError};
use crate::transport::{HttpInvoker, HttpRequest, ReqwestInvoker, RequestBody, TransportError};
use crate::types::{ApiResponse, Format, Operation, PairUpload};

/// Error types for client operations
#[derive(Debug, Error)]
pub enum ClientError {
	/// A required argument was empty; nothing was sent
	#[error("Missing required argument: {0}")]
	MissingArgument(&'static str),
	#[error("Signing error: {0}")]
	Signing(#[from] SigningError),
	#[error("Invalid endpoint URL {url}: {reason}")]
	InvalidEndpoint { url: String, reason: String },
	#[error("Transport error: {0}")]
	Transport(#[from] TransportError),
	#[error("Decode error: {0}")]
	Decode(#[from] DecodeError),
	#[error("Runtime error: {0}")]
	Runtime(String),
}

/// Client for the index lookup and verification service
///
/// Holds only the immutable credential pair and configuration, so one
/// client can serve concurrent callers. Every call builds its own
/// parameter set, signed request and result record.
pub struct Client<I = ReqwestInvoker> {
	signer: RequestSigner,
	config: ClientConfig,
	invoker: I,
}

impl Client<ReqwestInvoker> {
	/// Create a client with the default configuration
	///
	/// Fails if either credential is empty.
	pub fn new(api_id: impl Into<String>, api_key: impl Into<String>) -> Result<Self, ClientError> {
		Self::with_config(api_id, api_key, ClientConfig::default())
	}

	/// Create a client with custom configuration
	pub fn with_config(
		api_id: impl Into<String>,
		api_key: impl Into<String>,
		config: ClientConfig,
	) -> Result<Self, ClientError> {
		let credentials = Credentials::new(api_id, api_key)?;
		let invoker = ReqwestInvoker::new(&config)?;
		Ok(Self::with_invoker(credentials, config, invoker))
	}
}

impl<I: HttpInvoker> Client<I> {
	/// Create a client on top of a custom transport
	pub fn with_invoker(credentials: Credentials, config: ClientConfig, invoker: I) -> Self {
		let signer = RequestSigner::new(credentials, config.signature_order);
		Self {
			signer,
			config,
			invoker,
		}
	}

	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	pub fn format(&self) -> Format {
		self.config.format
	}

	pub fn invoker(&self) -> &I {
		&self.invoker
	}

	/// Look up the destination paired with an index
	pub async fn get_destination(&self, index: &str) -> Result<ApiResponse, ClientError> {
		require("index", index)?;

		let params = ParamSet::new().with("index", index);
		self.call(Operation::GetDestination, params, None).await
	}

	/// Pair an index with an uploaded destination file
	///
	/// `token` is a session token obtained through verification.
	pub async fn add_pair(
		&self,
		index: &str,
		token: &str,
		upload: PairUpload,
	) -> Result<ApiResponse, ClientError> {
		require("index", index)?;
		require("token", token)?;
		require("file", &upload.file_name)?;

		let params = ParamSet::new().with("index", index).with("token", token);
		self.call(Operation::AddPair, params, Some(upload)).await
	}

	/// Remove the pair registered for an index
	pub async fn delete_pair(&self, index: &str, token: &str) -> Result<ApiResponse, ClientError> {
		require("index", index)?;
		require("token", token)?;

		let params = ParamSet::new().with("index", index).with("token", token);
		self.call(Operation::DeletePair, params, None).await
	}

	/// Check whether a session token is still valid for an index
	pub async fn check_token(
		&self,
		index: &str,
		token: &str,
		ip: Option<&str>,
	) -> Result<ApiResponse, ClientError> {
		require("index", index)?;
		require("token", token)?;

		let params = with_ip(ParamSet::new().with("index", index).with("token", token), ip);
		self.call(Operation::CheckToken, params, None).await
	}

	/// Ask the service to send a verification code to an index
	pub async fn request_verification(
		&self,
		index: &str,
		ip: Option<&str>,
	) -> Result<ApiResponse, ClientError> {
		require("index", index)?;

		let params = with_ip(ParamSet::new().with("index", index), ip);
		self.call(Operation::RequestVerification, params, None).await
	}

	/// Submit the verification code entered by the user
	pub async fn attempt_verification(
		&self,
		index: &str,
		code: &str,
		ip: Option<&str>,
	) -> Result<ApiResponse, ClientError> {
		require("index", index)?;
		require("code", code)?;

		let params = with_ip(ParamSet::new().with("index", index).with("code", code), ip);
		self.call(Operation::AttemptVerification, params, None).await
	}

	/// Sign `params` and compose the HTTP request for `operation`
	///
	/// GET and DELETE carry the signed parameters in the query string,
	/// POST and PUT in a form body, multipart when a file is attached.
	pub fn prepare(
		&self,
		operation: Operation,
		params: ParamSet,
		upload: Option<PairUpload>,
	) -> Result<HttpRequest, ClientError> {
		let (endpoint, method) = operation.route();
		let base = self.config.endpoint_url(endpoint);
		let mut url = Url::parse(base).map_err(|e| ClientError::InvalidEndpoint {
			url: base.to_string(),
			reason: e.to_string(),
		})?;

		let signed = self.signer.sign(params)?;
		let pairs = signed.pairs();

		let body = if method.uses_query() {
			url.query_pairs_mut().extend_pairs(pairs);
			RequestBody::Empty
		} else {
			match upload {
				Some(upload) => RequestBody::Multipart {
					fields: pairs,
					upload,
				},
				None => RequestBody::Form(pairs),
			}
		};

		Ok(HttpRequest {
			method,
			url: url.to_string(),
			headers: vec![(
				"Accept".to_string(),
				self.config.format.accept_header().to_string(),
			)],
			body,
		})
	}

	async fn call(
		&self,
		operation: Operation,
		params: ParamSet,
		upload: Option<PairUpload>,
	) -> Result<ApiResponse, ClientError> {
		let request_id = Uuid::new_v4();
		let span = info_span!("zypline_call", %operation, %request_id);

		async move {
			let request = self.prepare(operation, params, upload)?;
			debug!(
				method = %request.method,
				endpoint = self.config.endpoint_url(operation.route().0),
				format = %self.config.format,
				"dispatching request"
			);

			let raw = self.invoker.invoke(request).await?;
			let record = decode(&raw, self.config.format)?;
			Ok::<_, ClientError>(ApiResponse { raw, record })
		}
		.instrument(span)
		.await
	}
}

fn require(name: &'static str, value: &str) -> Result<(), ClientError> {
	if value.is_empty() {
		return Err(ClientError::MissingArgument(name));
	}
	Ok(())
}

fn with_ip(params: ParamSet, ip: Option<&str>) -> ParamSet {
	match ip {
		Some(ip) => params.with("ip", ip),
		None => params,
	}
}

/// Synchronous client wrapper
///
/// Drives the async [`Client`] on a private current-thread runtime, so
/// every call blocks the caller until the response is decoded. Must not be
/// used from inside another tokio runtime.
pub struct SyncClient<I = ReqwestInvoker> {
	client: Client<I>,
	runtime: tokio::runtime::Runtime,
}

impl SyncClient<ReqwestInvoker> {
	/// Create a new synchronous client
	pub fn new(api_id: impl Into<String>, api_key: impl Into<String>) -> Result<Self, ClientError> {
		Self::from_client(Client::new(api_id, api_key)?)
	}

	pub fn with_config(
		api_id: impl Into<String>,
		api_key: impl Into<String>,
		config: ClientConfig,
	) -> Result<Self, ClientError> {
		Self::from_client(Client::with_config(api_id, api_key, config)?)
	}
}

impl<I: HttpInvoker> SyncClient<I> {
	pub fn from_client(client: Client<I>) -> Result<Self, ClientError> {
		let runtime = tokio::runtime::Builder::new_current_thread()
			.enable_all()
			.build()
			.map_err(|e| ClientError::Runtime(format!("Failed to create tokio runtime: {}", e)))?;
		Ok(Self { client, runtime })
	}

	pub fn client(&self) -> &Client<I> {
		&self.client
	}

	pub fn get_destination(&self, index: &str) -> Result<ApiResponse, ClientError> {
		self.runtime.block_on(self.client.get_destination(index))
	}

	pub fn add_pair(
		&self,
		index: &str,
		token: &str,
		upload: PairUpload,
	) -> Result<ApiResponse, ClientError> {
		self.runtime.block_on(self.client.add_pair(index, token, upload))
	}

	pub fn delete_pair(&self, index: &str, token: &str) -> Result<ApiResponse, ClientError> {
		self.runtime.block_on(self.client.delete_pair(index, token))
	}

	pub fn check_token(
		&self,
		index: &str,
		token: &str,
		ip: Option<&str>,
	) -> Result<ApiResponse, ClientError> {
		self.runtime.block_on(self.client.check_token(index, token, ip))
	}

	pub fn request_verification(
		&self,
		index: &str,
		ip: Option<&str>,
	) -> Result<ApiResponse, ClientError> {
		self.runtime
			.block_on(self.client.request_verification(index, ip))
	}

	pub fn attempt_verification(
		&self,
		index: &str,
		code: &str,
		ip: Option<&str>,
	) -> Result<ApiResponse, ClientError> {
		self.runtime
			.block_on(self.client.attempt_verification(index, code, ip))
	}
}
