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

//! Zypline SDK - Client library for index lookup and verification
//!
//! This crate signs requests for the Zypline REST service and normalizes
//! its JSON or XML answers into one flat [`ResultRecord`].
//!
//! Data flow: [`ParamSet`] → [`RequestSigner`] → [`HttpInvoker`] → raw
//! bytes → [`decode`] → [`ResultRecord`].
//!
//! The SDK is designed to be lightweight and embeddable:
//! - No background threads
//! - No retries or response caching
//! - No environment or configuration loading

pub mod client;
pub mod config;
pub mod decode;
pub mod params;
pub mod signing;
pub mod transport;
pub mod types;

pub use client::{Client, ClientError, SyncClient};
pub use config::ClientConfig;
pub use decode::{DecodeError, ResponseDecoder, decode, decode_strict};
pub use params::ParamSet;
pub use signing::{
	Credentials, RequestSigner, SignatureOrder, SignedRequest, SigningError, compute_hash,
	signing_string,
};
pub use transport::{HttpInvoker, HttpRequest, ReqwestInvoker, RequestBody, TransportError};
pub use types::*;
