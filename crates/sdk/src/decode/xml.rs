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

use std::collections::HashMap;

use quick_xml::{
	Reader,
	events::{BytesStart, Event},
};

use super::{DecodeError, ResponseDecoder};
use crate::types::{Field, Format, ResultRecord};

/// Elements deeper than this below the root are never read
const MAX_CAPTURE_DEPTH: usize = 2;

type Attributes = HashMap<String, String>;

/// Decoder for `text/xml` responses
///
/// Values live in attributes of the root's child elements, e.g.
/// `<zypline><token token="..." expiration="..."/></zypline>`.
/// Thumbnails sit one level further down in `destination/thumbs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlDecoder;

impl ResponseDecoder for XmlDecoder {
	fn decode_body(&self, body: &str) -> Result<ResultRecord, DecodeError> {
		let elements = Collector::default().run(body)?;

		let mut record = ResultRecord::default();
		for field in Field::ALL {
			let (path, attribute) = field.xml_location();
			*record.field_mut(*field) = elements
				.get(path)
				.and_then(|attributes| attributes.get(attribute))
				.cloned();
		}
		Ok(record)
	}
}

fn malformed(reason: impl ToString) -> DecodeError {
	DecodeError::malformed(Format::Xml, reason)
}

/// Walks the document once, keeping the attributes of the first element
/// seen at each shallow path below the root
#[derive(Default)]
struct Collector {
	elements: HashMap<String, Attributes>,
	/// Local names of the open elements below the root
	path: Vec<String>,
	/// Open elements, root included
	depth: usize,
	roots: usize,
}

impl Collector {
	fn run(mut self, body: &str) -> Result<HashMap<String, Attributes>, DecodeError> {
		let mut reader = Reader::from_str(body.trim_start_matches('\u{feff}'));

		loop {
			match reader.read_event().map_err(malformed)? {
				Event::Start(start) => {
					let name = self.enter(&start)?;
					if self.depth > 0 {
						self.path.push(name);
					}
					self.depth += 1;
				}
				Event::Empty(start) => {
					self.enter(&start)?;
				}
				Event::End(_) => {
					self.depth = self
						.depth
						.checked_sub(1)
						.ok_or_else(|| malformed("closing tag without matching opening tag"))?;
					self.path.pop();
				}
				Event::Text(text) if self.depth == 0 => {
					if !text.iter().all(u8::is_ascii_whitespace) {
						return Err(malformed("text outside the root element"));
					}
				}
				Event::CData(_) if self.depth == 0 => {
					return Err(malformed("character data outside the root element"));
				}
				Event::Eof => break,
				_ => {}
			}
		}

		if self.depth != 0 {
			return Err(malformed("unexpected end of document inside an element"));
		}
		if self.roots == 0 {
			return Err(malformed("document has no root element"));
		}
		Ok(self.elements)
	}

	/// Register an element opening at the current depth and return its local name
	fn enter(&mut self, start: &BytesStart<'_>) -> Result<String, DecodeError> {
		let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();

		if self.depth == 0 {
			self.roots += 1;
			if self.roots > 1 {
				return Err(malformed("document has more than one root element"));
			}
			return Ok(name);
		}

		if self.path.len() < MAX_CAPTURE_DEPTH {
			let key = if self.path.is_empty() {
				name.clone()
			} else {
				format!("{}/{}", self.path.join("/"), name)
			};
			if !self.elements.contains_key(&key) {
				let attributes = attributes(start)?;
				self.elements.insert(key, attributes);
			}
		}
		Ok(name)
	}
}

fn attributes(start: &BytesStart<'_>) -> Result<Attributes, DecodeError> {
	let mut attributes = Attributes::new();
	for attribute in start.attributes() {
		let attribute = attribute.map_err(malformed)?;
		let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
		let value = attribute.unescape_value().map_err(malformed)?;
		attributes.entry(key).or_insert_with(|| value.into_owned());
	}
	Ok(attributes)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn decode(body: &str) -> Result<ResultRecord, DecodeError> {
		XmlDecoder.decode_body(body)
	}

	#[test]
	fn test_legacy_elements() {
		let record = decode(
			r#"<?xml version="1.0" encoding="UTF-8"?>
			<zypline>
				<params index="5551234567" country="US" ip="1.2.3.4"/>
				<index prepped="15551234567" friendly="(555) 123-4567"/>
				<token token="abc123" expiration="2025-01-01 00:00:00" bool="1"/>
				<result bool="1" description="Token is valid"/>
				<error number="0" description=""/>
			</zypline>"#,
		)
		.unwrap();

		assert_eq!(record.raw_index.as_deref(), Some("5551234567"));
		assert_eq!(record.raw_country.as_deref(), Some("US"));
		assert_eq!(record.raw_ip.as_deref(), Some("1.2.3.4"));
		assert_eq!(record.prepped_index.as_deref(), Some("15551234567"));
		assert_eq!(record.friendly_index.as_deref(), Some("(555) 123-4567"));
		assert_eq!(record.token.as_deref(), Some("abc123"));
		assert_eq!(record.token_expiration.as_deref(), Some("2025-01-01 00:00:00"));
		assert_eq!(record.token_bool.as_deref(), Some("1"));
		assert_eq!(record.result_bool.as_deref(), Some("1"));
		assert_eq!(record.result_desc.as_deref(), Some("Token is valid"));
		assert_eq!(record.error_no.as_deref(), Some("0"));
		assert_eq!(record.error_desc.as_deref(), Some(""));
		assert_eq!(record.url, None);
	}

	#[test]
	fn test_nested_thumbs_and_entities() {
		let record = decode(
			r#"<zypline>
				<destination url="http://example.com/a?b=1&amp;c=2" type="image">
					<thumbs full="f.png" small="s.png"/>
				</destination>
			</zypline>"#,
		)
		.unwrap();

		assert_eq!(record.url.as_deref(), Some("http://example.com/a?b=1&c=2"));
		assert_eq!(record.file_type.as_deref(), Some("image"));
		assert_eq!(record.thumbs_full.as_deref(), Some("f.png"));
		assert_eq!(record.thumbs_small.as_deref(), Some("s.png"));
		assert_eq!(record.thumbs_large, None);
	}

	#[test]
	fn test_first_occurrence_wins_and_deep_elements_ignored() {
		let record = decode(
			r#"<zypline>
				<result bool="1" description="first"/>
				<result bool="0" description="second"/>
				<meta><result bool="9"/><country><x code="1"/></country></meta>
			</zypline>"#,
		)
		.unwrap();

		assert_eq!(record.result_bool.as_deref(), Some("1"));
		assert_eq!(record.result_desc.as_deref(), Some("first"));
		assert_eq!(record.country_code, None);
	}

	#[test]
	fn test_root_name_is_not_checked() {
		let record = decode(r#"<response><error number="12" description="bad hash"/></response>"#)
			.unwrap();

		assert_eq!(record.error_no.as_deref(), Some("12"));
		assert_eq!(record.error_desc.as_deref(), Some("bad hash"));
	}

	#[test]
	fn test_element_text_is_ignored() {
		let record = decode("<zypline><result>1</result></zypline>").unwrap();
		assert!(record.is_empty());
	}

	#[test]
	fn test_malformed_documents() {
		for body in [
			"<bad",
			"<zypline><result bool=\"1\"></zypline>",
			"<zypline>",
			"plain text",
			"<a/><b/>",
			"<zypline><result bool=\"1\" bool=\"2\"/></zypline>",
		] {
			assert!(
				matches!(
					decode(body),
					Err(DecodeError::Malformed {
						format: Format::Xml,
						..
					})
				),
				"expected malformed: {}",
				body
			);
		}
	}
}
