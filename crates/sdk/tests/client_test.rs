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

//! Integration tests for the client
//!
//! These tests verify, without any network access:
//! - The routing table (verb and endpoint per operation)
//! - Request composition (query string, form and multipart bodies, Accept header)
//! - Argument validation before any transport activity
//! - Error propagation from transport and decoding

use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Url;
use zypline_sdk::{
	Client, ClientConfig, ClientError, Credentials, DecodeError, Format, HttpInvoker, HttpRequest,
	Method, PairUpload, ParamSet, RequestBody, SignatureOrder, SyncClient, TransportError,
	compute_hash,
};

const RESOURCE_URL: &str = "http://resource.test/zyp/";
const VERIFICATION_URL: &str = "http://verify.test/verify/";

/// Records every request and answers with a canned response
struct RecordingInvoker {
	requests: Mutex<Vec<HttpRequest>>,
	response: Result<Vec<u8>, String>,
}

impl RecordingInvoker {
	fn answering(body: &str) -> Self {
		Self {
			requests: Mutex::new(Vec::new()),
			response: Ok(body.as_bytes().to_vec()),
		}
	}

	fn failing(reason: &str) -> Self {
		Self {
			requests: Mutex::new(Vec::new()),
			response: Err(reason.to_string()),
		}
	}

	fn requests(&self) -> Vec<HttpRequest> {
		self.requests.lock().unwrap().clone()
	}
}

#[async_trait]
impl HttpInvoker for RecordingInvoker {
	async fn invoke(&self, request: HttpRequest) -> Result<Vec<u8>, TransportError> {
		self.requests.lock().unwrap().push(request);
		match &self.response {
			Ok(body) => Ok(body.clone()),
			Err(reason) => Err(TransportError::Request(reason.clone())),
		}
	}
}

fn create_test_client(format: Format, invoker: RecordingInvoker) -> Client<RecordingInvoker> {
	let config = ClientConfig {
		resource_url: RESOURCE_URL.to_string(),
		verification_url: VERIFICATION_URL.to_string(),
		format,
		..Default::default()
	};
	let credentials = Credentials::new("demo-id", "s3cret").unwrap();
	Client::with_invoker(credentials, config, invoker)
}

fn query_pairs(request: &HttpRequest) -> Vec<(String, String)> {
	Url::parse(&request.url)
		.unwrap()
		.query_pairs()
		.into_owned()
		.collect()
}

fn base_url(request: &HttpRequest) -> String {
	let mut url = Url::parse(&request.url).unwrap();
	url.set_query(None);
	url.to_string()
}

fn value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
	pairs
		.iter()
		.find(|(k, _)| k == key)
		.map(|(_, v)| v.as_str())
}

const OK_JSON: &str = r#"{"zypline":{"meta":{"result":{"bool":"1","description":"ok"}}}}"#;

#[tokio::test]
async fn test_get_destination_signs_query_string() {
	let client = create_test_client(Format::Json, RecordingInvoker::answering(OK_JSON));

	let response = client.get_destination("5551234567").await.unwrap();
	assert_eq!(response.record.result_bool.as_deref(), Some("1"));
	assert_eq!(response.raw, OK_JSON.as_bytes());

	let requests = client.invoker().requests();
	assert_eq!(requests.len(), 1);
	let request = &requests[0];

	assert_eq!(request.method, Method::Get);
	assert_eq!(base_url(request), RESOURCE_URL);
	assert_eq!(request.body, RequestBody::Empty);
	assert_eq!(request.header("Accept"), Some("application/json"));

	let pairs = query_pairs(request);
	assert_eq!(value(&pairs, "index"), Some("5551234567"));
	assert_eq!(value(&pairs, "api_id"), Some("demo-id"));
	assert_eq!(
		value(&pairs, "hash"),
		Some("73a1be5dbb65b056f83c33b388394ca9b55abe0c")
	);
}

#[tokio::test]
async fn test_operations_follow_routing_table() {
	let client = create_test_client(Format::Json, RecordingInvoker::answering(OK_JSON));
	let upload = PairUpload::new("menu.pdf", "application/pdf", b"%PDF-1.4".to_vec());

	client.get_destination("1").await.unwrap();
	client.add_pair("1", "tok", upload).await.unwrap();
	client.delete_pair("1", "tok").await.unwrap();
	client.check_token("1", "tok", None).await.unwrap();
	client.request_verification("1", None).await.unwrap();
	client.attempt_verification("1", "4321", None).await.unwrap();

	let routes: Vec<(Method, String)> = client
		.invoker()
		.requests()
		.iter()
		.map(|request| (request.method, base_url(request)))
		.collect();

	assert_eq!(
		routes,
		vec![
			(Method::Get, RESOURCE_URL.to_string()),
			(Method::Post, RESOURCE_URL.to_string()),
			(Method::Delete, RESOURCE_URL.to_string()),
			(Method::Get, VERIFICATION_URL.to_string()),
			(Method::Post, VERIFICATION_URL.to_string()),
			(Method::Put, VERIFICATION_URL.to_string()),
		]
	);
}

#[tokio::test]
async fn test_delete_pair_uses_query_string() {
	let client = create_test_client(Format::Json, RecordingInvoker::answering(OK_JSON));
	client.delete_pair("5551234567", "tok").await.unwrap();

	let requests = client.invoker().requests();
	let request = &requests[0];
	assert_eq!(request.body, RequestBody::Empty);

	let pairs = query_pairs(request);
	assert_eq!(value(&pairs, "index"), Some("5551234567"));
	assert_eq!(value(&pairs, "token"), Some("tok"));
	assert!(value(&pairs, "hash").is_some());
}

#[tokio::test]
async fn test_add_pair_sends_multipart_body() {
	let client = create_test_client(Format::Json, RecordingInvoker::answering(OK_JSON));
	let upload = PairUpload::new("menu.pdf", "application/pdf", b"%PDF-1.4".to_vec());

	client
		.add_pair("5551234567", "tok", upload.clone())
		.await
		.unwrap();

	let requests = client.invoker().requests();
	let request = &requests[0];
	match &request.body {
		RequestBody::Multipart {
			fields,
			upload: sent,
		} => {
			assert_eq!(sent, &upload);
			assert_eq!(value(fields, "index"), Some("5551234567"));
			assert_eq!(value(fields, "token"), Some("tok"));
			assert_eq!(value(fields, "api_id"), Some("demo-id"));

			let expected = compute_hash(
				&ParamSet::new().with("index", "5551234567").with("token", "tok"),
				"s3cret",
				SignatureOrder::Sorted,
			)
			.unwrap();
			assert_eq!(value(fields, "hash"), Some(expected.as_str()));
		}
		other => panic!("expected multipart body, got {:?}", other),
	}
}

#[tokio::test]
async fn test_request_verification_sends_form_body() {
	let client = create_test_client(Format::Json, RecordingInvoker::answering(OK_JSON));
	client
		.request_verification("5551234567", Some("1.2.3.4"))
		.await
		.unwrap();

	let requests = client.invoker().requests();
	let request = &requests[0];
	assert_eq!(request.method, Method::Post);
	assert_eq!(request.url, VERIFICATION_URL);
	assert_eq!(
		request.body,
		RequestBody::Form(vec![
			("index".to_string(), "5551234567".to_string()),
			("ip".to_string(), "1.2.3.4".to_string()),
			("api_id".to_string(), "demo-id".to_string()),
			(
				"hash".to_string(),
				"0602222005a251655d47530fcb5248d35b0fa2cb".to_string()
			),
		])
	);
}

#[tokio::test]
async fn test_empty_ip_is_sent_but_not_signed() {
	let client = create_test_client(Format::Json, RecordingInvoker::answering(OK_JSON));
	client
		.attempt_verification("5551234567", "4321", Some(""))
		.await
		.unwrap();

	let requests = client.invoker().requests();
	let request = &requests[0];
	assert_eq!(request.method, Method::Put);
	let RequestBody::Form(fields) = &request.body else {
		panic!("expected form body");
	};

	assert_eq!(value(fields, "ip"), Some(""));
	let expected = compute_hash(
		&ParamSet::new().with("index", "5551234567").with("code", "4321"),
		"s3cret",
		SignatureOrder::Sorted,
	)
	.unwrap();
	assert_eq!(value(fields, "hash"), Some(expected.as_str()));
}

#[tokio::test]
async fn test_ip_omitted_when_not_given() {
	let client = create_test_client(Format::Json, RecordingInvoker::answering(OK_JSON));
	client.check_token("5551234567", "tok", None).await.unwrap();

	let requests = client.invoker().requests();
	let pairs = query_pairs(&requests[0]);
	assert_eq!(value(&pairs, "ip"), None);
	assert_eq!(value(&pairs, "token"), Some("tok"));
}

#[tokio::test]
async fn test_missing_arguments_never_reach_transport() {
	let client = create_test_client(Format::Json, RecordingInvoker::answering(OK_JSON));
	let upload = || PairUpload::new("menu.pdf", "application/pdf", Vec::new());

	let cases = vec![
		(client.get_destination("").await, "index"),
		(client.add_pair("", "tok", upload()).await, "index"),
		(client.add_pair("1", "", upload()).await, "token"),
		(
			client
				.add_pair("1", "tok", PairUpload::new("", "text/plain", Vec::new()))
				.await,
			"file",
		),
		(client.delete_pair("1", "").await, "token"),
		(client.check_token("", "tok", Some("1.2.3.4")).await, "index"),
		(client.check_token("1", "", None).await, "token"),
		(client.request_verification("", None).await, "index"),
		(client.attempt_verification("1", "", None).await, "code"),
	];

	for (result, expected) in cases {
		match result {
			Err(ClientError::MissingArgument(name)) => assert_eq!(name, expected),
			other => panic!("expected missing {}, got {:?}", expected, other),
		}
	}
	assert!(client.invoker().requests().is_empty());
}

#[tokio::test]
async fn test_transport_error_is_surfaced() {
	let client = create_test_client(
		Format::Json,
		RecordingInvoker::failing("connection refused"),
	);

	let result = client.get_destination("5551234567").await;
	assert!(matches!(
		result,
		Err(ClientError::Transport(TransportError::Request(_)))
	));
}

#[tokio::test]
async fn test_malformed_body_is_surfaced() {
	let client = create_test_client(Format::Json, RecordingInvoker::answering("<html>"));

	let result = client.get_destination("5551234567").await;
	assert!(matches!(
		result,
		Err(ClientError::Decode(DecodeError::Malformed {
			format: Format::Json,
			..
		}))
	));
}

#[tokio::test]
async fn test_empty_body_yields_unset_record() {
	let client = create_test_client(Format::Xml, RecordingInvoker::answering(""));

	let response = client.get_destination("5551234567").await.unwrap();
	assert!(response.raw.is_empty());
	assert!(response.record.is_empty());
}

#[tokio::test]
async fn test_xml_client_requests_and_decodes_xml() {
	let body = r#"<zypline><token token="abc" bool="1"/><result bool="1" description="valid"/></zypline>"#;
	let client = create_test_client(Format::Xml, RecordingInvoker::answering(body));

	let response = client
		.check_token("5551234567", "abc", Some("1.2.3.4"))
		.await
		.unwrap();

	let requests = client.invoker().requests();
	assert_eq!(requests[0].header("Accept"), Some("text/xml"));
	assert_eq!(response.record.token.as_deref(), Some("abc"));
	assert_eq!(response.record.token_bool.as_deref(), Some("1"));
	assert_eq!(response.record.result_desc.as_deref(), Some("valid"));
}

#[tokio::test]
async fn test_business_error_is_returned_as_data() {
	let body = r#"{"zypline":{"meta":{"result":{"bool":"0","description":"failed"},"error":{"number":"104","description":"Invalid hash"}}}}"#;
	let client = create_test_client(Format::Json, RecordingInvoker::answering(body));

	let response = client.get_destination("5551234567").await.unwrap();
	assert_eq!(response.record.result_bool.as_deref(), Some("0"));
	assert_eq!(response.record.error_no.as_deref(), Some("104"));
	assert_eq!(response.record.error_desc.as_deref(), Some("Invalid hash"));
}

#[tokio::test]
async fn test_responses_are_not_shared_between_calls() {
	let client = create_test_client(Format::Json, RecordingInvoker::answering(OK_JSON));

	let (first, second) = tokio::join!(
		client.get_destination("111"),
		client.request_verification("222", None)
	);
	let (first, second) = (first.unwrap(), second.unwrap());

	assert_eq!(first.record, second.record);
	assert_eq!(client.invoker().requests().len(), 2);
}

#[test]
fn test_sync_client_blocks_on_custom_invoker() {
	let client = create_test_client(Format::Json, RecordingInvoker::answering(OK_JSON));
	let client = SyncClient::from_client(client).unwrap();

	let response = client.get_destination("5551234567").unwrap();
	assert_eq!(response.record.result_desc.as_deref(), Some("ok"));
	assert_eq!(client.client().invoker().requests().len(), 1);
}
