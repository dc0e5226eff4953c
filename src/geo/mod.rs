// Locations API
// Copyright 2025 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! APIs to resolve postal addresses into coordinates.

use crate::model::Coordinate;
use async_trait::async_trait;
use std::io;

mod google;
pub use google::GoogleGeocoderOptions;
pub(crate) use google::GoogleGeocoder;

/// Result type for this module.
pub(crate) type GeoResult<T> = io::Result<T>;

/// The query string sent to the geocoding service for one location.
///
/// The query is the concatenation of the whitespace-split tokens of the address, then the city,
/// then the state, joined by `+` characters.  This exact format is part of the outbound wire
/// contract, so it is captured here as a type instead of being rebuilt ad-hoc by callers.
#[derive(Clone, Eq, Hash, PartialEq)]
#[cfg_attr(test, derive(Debug))]
pub(crate) struct AddressQuery(String);

impl AddressQuery {
    /// Builds the query for a location given its `address`, `city` and `state` fields.
    ///
    /// Empty fields simply contribute no tokens; an all-empty location yields an empty query,
    /// which is still a valid query to send.
    pub(crate) fn new(address: &str, city: &str, state: &str) -> Self {
        let tokens: Vec<&str> = address
            .split_whitespace()
            .chain(city.split_whitespace())
            .chain(state.split_whitespace())
            .collect();
        Self(tokens.join("+"))
    }

    /// Returns a string view of the query.
    pub(crate) fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Interface to resolve an address query into coordinates.
#[async_trait]
pub(crate) trait Geocoder {
    /// Resolves `query` against the geocoding service and returns the coordinates of the first
    /// candidate, or `None` if the service reported no candidates at all.
    async fn resolve(&self, query: &AddressQuery) -> GeoResult<Option<Coordinate>>;
}
