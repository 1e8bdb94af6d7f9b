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

use crate::types::Field;

impl Field {
	/// JSON pointer below the `zypline` wrapper object
	pub(crate) fn json_pointer(&self) -> &'static str {
		match self {
			Field::RawIndex => "/params/index",
			Field::RawCountry => "/params/country",
			Field::RawSuffix => "/params/suffix",
			Field::RawIp => "/params/ip",
			Field::PreppedIndex => "/index/prepped",
			Field::FriendlyIndex => "/index/friendly",
			Field::Suffix => "/index/suffix",
			Field::LocalIndex => "/index/local",
			Field::ContactIndex => "/index/contact",
			Field::Navi => "/index/navi",
			Field::ShortNavi => "/index/shortnavi",
			Field::Url => "/destination/url",
			Field::Filename => "/destination/filename",
			Field::FileType => "/destination/type",
			Field::Updated => "/destination/updated",
			Field::Expiration => "/destination/expiration",
			Field::ThumbsFull => "/destination/thumbs/full",
			Field::ThumbsLarge => "/destination/thumbs/large",
			Field::ThumbsMedium => "/destination/thumbs/medium",
			Field::ThumbsSmall => "/destination/thumbs/small",
			Field::Token => "/token/token",
			Field::TokenExpiration => "/token/expiration",
			Field::TokenBool => "/token/bool",
			Field::CountryCode => "/meta/country/code",
			Field::CountryIso => "/meta/country/iso",
			Field::CountryName => "/meta/country/name",
			Field::ResultBool => "/meta/result/bool",
			Field::ResultDesc => "/meta/result/description",
			Field::ErrorNo => "/meta/error/number",
			Field::ErrorDesc => "/meta/error/description",
		}
	}

	/// Element path below the XML root and the attribute holding the value
	pub(crate) fn xml_location(&self) -> (&'static str, &'static str) {
		match self {
			Field::RawIndex => ("params", "index"),
			Field::RawCountry => ("params", "country"),
			Field::RawSuffix => ("params", "suffix"),
			Field::RawIp => ("params", "ip"),
			Field::PreppedIndex => ("index", "prepped"),
			Field::FriendlyIndex => ("index", "friendly"),
			Field::Suffix => ("index", "suffix"),
			Field::LocalIndex => ("index", "local"),
			Field::ContactIndex => ("index", "contact"),
			Field::Navi => ("index", "navi"),
			Field::ShortNavi => ("index", "shortnavi"),
			Field::Url => ("destination", "url"),
			Field::Filename => ("destination", "filename"),
			Field::FileType => ("destination", "type"),
			Field::Updated => ("destination", "updated"),
			Field::Expiration => ("destination", "expiration"),
			Field::ThumbsFull => ("destination/thumbs", "full"),
			Field::ThumbsLarge => ("destination/thumbs", "large"),
			Field::ThumbsMedium => ("destination/thumbs", "medium"),
			Field::ThumbsSmall => ("destination/thumbs", "small"),
			Field::Token => ("token", "token"),
			Field::TokenExpiration => ("token", "expiration"),
			Field::TokenBool => ("token", "bool"),
			Field::CountryCode => ("country", "code"),
			Field::CountryIso => ("country", "iso"),
			Field::CountryName => ("country", "name"),
			Field::ResultBool => ("result", "bool"),
			Field::ResultDesc => ("result", "description"),
			Field::ErrorNo => ("error", "number"),
			Field::ErrorDesc => ("error", "description"),
		}
	}
}
