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

use serde_json::Value;

use super::{DecodeError, ResponseDecoder};
use crate::types::{Field, Format, ResultRecord};

/// Top-level key wrapping every JSON payload
pub const WRAPPER_KEY: &str = "zypline";

/// Decoder for `application/json` responses
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl ResponseDecoder for JsonDecoder {
	fn decode_body(&self, body: &str) -> Result<ResultRecord, DecodeError> {
		let document: Value =
			serde_json::from_str(body).map_err(|e| DecodeError::malformed(Format::Json, e))?;
		if document.is_null() {
			return Err(DecodeError::Empty);
		}
		if !document.is_object() {
			return Err(DecodeError::malformed(
				Format::Json,
				"top-level value is not an object",
			));
		}

		let mut record = ResultRecord::default();
		let Some(payload) = document.get(WRAPPER_KEY) else {
			return Ok(record);
		};

		for field in Field::ALL {
			*record.field_mut(*field) = payload.pointer(field.json_pointer()).and_then(scalar);
		}
		Ok(record)
	}
}

/// String form of a scalar leaf; `null` and containers count as absent
fn scalar(value: &Value) -> Option<String> {
	match value {
		Value::String(s) => Some(s.clone()),
		Value::Number(n) => Some(n.to_string()),
		Value::Bool(true) => Some("1".to_string()),
		Value::Bool(false) => Some("0".to_string()),
		Value::Null | Value::Array(_) | Value::Object(_) => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn decode(body: &str) -> Result<ResultRecord, DecodeError> {
		JsonDecoder.decode_body(body)
	}

	#[test]
	fn test_result_only_payload() {
		let record =
			decode(r#"{"zypline":{"meta":{"result":{"bool":"1","description":"ok"}}}}"#).unwrap();

		assert_eq!(record.result_bool.as_deref(), Some("1"));
		assert_eq!(record.result_desc.as_deref(), Some("ok"));
		assert_eq!(record.populated().count(), 2);
	}

	#[test]
	fn test_scalars_are_coerced_to_strings() {
		let record = decode(
			r#"{"zypline":{
				"meta":{"error":{"number":404,"description":"not found"},
				        "result":{"bool":false}},
				"token":{"bool":true,"expiration":1735689600}
			}}"#,
		)
		.unwrap();

		assert_eq!(record.error_no.as_deref(), Some("404"));
		assert_eq!(record.error_desc.as_deref(), Some("not found"));
		assert_eq!(record.result_bool.as_deref(), Some("0"));
		assert_eq!(record.token_bool.as_deref(), Some("1"));
		assert_eq!(record.token_expiration.as_deref(), Some("1735689600"));
	}

	#[test]
	fn test_non_scalar_leaves_are_unset() {
		let record = decode(
			r#"{"zypline":{"params":{"index":null,"country":["us"],"ip":{"v4":"1.2.3.4"}}}}"#,
		)
		.unwrap();

		assert!(record.is_empty());
	}

	#[test]
	fn test_missing_wrapper_is_all_unset() {
		let record = decode(r#"{"other":{"params":{"index":"abc"}}}"#).unwrap();
		assert!(record.is_empty());
	}

	#[test]
	fn test_sub_object_of_wrong_shape_is_tolerated() {
		let record = decode(r#"{"zypline":{"destination":"gone","index":{"prepped":"15551234567"}}}"#)
			.unwrap();

		assert_eq!(record.prepped_index.as_deref(), Some("15551234567"));
		assert_eq!(record.url, None);
		assert_eq!(record.thumbs_full, None);
	}

	#[test]
	fn test_null_document_has_no_content() {
		assert!(matches!(decode("null"), Err(DecodeError::Empty)));
		assert!(matches!(decode(" null\n"), Err(DecodeError::Empty)));
	}

	#[test]
	fn test_non_object_top_level_is_malformed() {
		assert!(matches!(
			decode("[1, 2, 3]"),
			Err(DecodeError::Malformed {
				format: Format::Json,
				..
			})
		));
		assert!(matches!(
			decode("\"zypline\""),
			Err(DecodeError::Malformed { .. })
		));
	}
}
