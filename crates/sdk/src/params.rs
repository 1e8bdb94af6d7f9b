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

/// Caller-supplied key/value arguments for one API call
///
/// Keys are unique. Insertion order is remembered so that the legacy
/// insertion-order signing mode can be reproduced, but the default
/// signature does not depend on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamSet {
	entries: Vec<(String, String)>,
}

impl ParamSet {
	/// Create an empty parameter set
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder form of [`ParamSet::insert`]
	pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.insert(key, value);
		self
	}

	/// Insert a parameter
	///
	/// An existing key keeps its position and has its value replaced.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
		let key = key.into();
		let value = value.into();
		match self.entries.iter_mut().find(|(k, _)| *k == key) {
			Some(entry) => entry.1 = value,
			None => self.entries.push((key, value)),
		}
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.entries
			.iter()
			.find(|(k, _)| k == key)
			.map(|(_, v)| v.as_str())
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.entries.iter().any(|(k, _)| k == key)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterate over entries in insertion order
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	pub fn into_pairs(self) -> Vec<(String, String)> {
		self.entries
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParamSet {
	fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
		let mut params = ParamSet::new();
		for (key, value) in iter {
			params.insert(key, value);
		}
		params
	}
}
