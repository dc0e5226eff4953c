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

//! High-level data types.

use derive_getters::Getters;
use derive_more::Constructor;
use rand::RngCore;
use serde::{Deserialize, Serialize, de::Visitor};
use std::fmt::Write;

/// Errors related to the processing of model types.
#[derive(Debug, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct ModelError(pub String);

/// Result type for this module.
pub(crate) type ModelResult<T> = Result<T, ModelError>;

/// Number of hexadecimal characters in the string form of a location identifier.
const LOCATION_ID_LENGTH: usize = 24;

/// Represents a well-formed (but maybe non-existent) location identifier.
///
/// Identifiers are the hex serialization of the 12 bytes that key a record in the store.  They
/// are case-insensitive on input and normalized to lowercase.
#[derive(Clone, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[cfg_attr(test, derive(Debug))]
#[serde(transparent)]
pub(crate) struct LocationId(String);

impl LocationId {
    /// Creates a new identifier from an untrusted string `s`, making sure it is valid.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();

        if s.len() != LOCATION_ID_LENGTH {
            return Err(ModelError(format!(
                "Location id '{}' does not have length {}",
                s, LOCATION_ID_LENGTH
            )));
        }

        for ch in s.chars() {
            if !ch.is_ascii_hexdigit() {
                return Err(ModelError(format!(
                    "Unsupported character '{}' in location id '{}'",
                    ch, s
                )));
            }
        }

        Ok(Self(s.to_lowercase()))
    }

    /// Generates a fresh identifier for a new record.
    pub(crate) fn random() -> Self {
        let mut bytes = [0u8; LOCATION_ID_LENGTH / 2];
        rand::rng().fill_bytes(&mut bytes);

        let mut s = String::with_capacity(LOCATION_ID_LENGTH);
        for byte in bytes {
            write!(&mut s, "{:02x}", byte).expect("Writes to a string cannot fail");
        }
        Self(s)
    }

    /// Returns a string view of the identifier.
    pub(crate) fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
impl From<&'static str> for LocationId {
    /// Creates a new identifier from a hardcoded string, which must be valid.
    fn from(id: &'static str) -> Self {
        assert_eq!(id, id.to_lowercase(), "Hardcoded location ids must be lowercase");
        LocationId::new(id).expect("Hardcoded location ids must be valid")
    }
}

/// A deserialization visitor for a `LocationId`.
struct LocationIdVisitor;

impl Visitor<'_> for LocationIdVisitor {
    type Value = LocationId;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a hex-encoded location id")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        LocationId::new(v).map_err(|e| E::custom(e.to_string()))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        LocationId::new(v).map_err(|e| E::custom(e.to_string()))
    }
}

impl<'de> Deserialize<'de> for LocationId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_string(LocationIdVisitor)
    }
}

/// A latitude/longitude pair as computed by the geocoding service.
///
/// Coordinates are never supplied by clients: they are always derived from the postal fields of
/// a location at the time the record is written.
#[derive(Clone, Constructor, Copy, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize))]
pub(crate) struct Coordinate {
    /// Degrees of latitude, north positive.
    latitude: f64,

    /// Degrees of longitude, east positive.
    longitude: f64,
}

/// A stored location record.
#[derive(Constructor, Getters, Serialize)]
#[cfg_attr(test, derive(Clone, Debug, Deserialize, PartialEq))]
pub(crate) struct Location {
    /// Free-text label for the record.  Assigned at creation time and never overwritten by
    /// later modifications.
    name: String,

    /// Street address of the location.
    address: String,

    /// City of the location.
    city: String,

    /// State of the location.
    state: String,

    /// Postal code of the location.
    zip: String,

    /// Store identifier of the record.
    id: LocationId,

    /// Coordinates derived from `address`, `city` and `state` at the last write.
    coordinate: Coordinate,
}

impl Location {
    /// Combines this record with the fields in `input` to produce the record that a
    /// modification must persist.
    ///
    /// The name and the identifier always come from the existing record.  Each postal field is
    /// overwritten only if the client supplied a non-empty value.  The coordinate is always the
    /// freshly computed one, even if no postal field changed.
    pub(crate) fn merged_with(self, input: LocationInput, coordinate: Coordinate) -> Location {
        /// Picks the `new` value of one postal field unless it is empty.
        fn pick(new: String, old: String) -> String {
            if new.is_empty() { old } else { new }
        }

        Location {
            name: self.name,
            address: pick(input.address, self.address),
            city: pick(input.city, self.city),
            state: pick(input.state, self.state),
            zip: pick(input.zip, self.zip),
            id: self.id,
            coordinate,
        }
    }
}

/// Client-supplied fields of a location, as accepted by the create and modify APIs.
///
/// Every field is optional in the payload and defaults to the empty string, mirroring how the
/// fields behave on modifications (where an empty value means "keep the stored one").
#[derive(Constructor, Deserialize, Getters)]
#[cfg_attr(test, derive(Clone, Debug, PartialEq, Serialize))]
pub(crate) struct LocationInput {
    /// Free-text label for the record.  Ignored by modifications.
    #[serde(default)]
    name: String,

    /// Street address of the location.
    #[serde(default)]
    address: String,

    /// City of the location.
    #[serde(default)]
    city: String,

    /// State of the location.
    #[serde(default)]
    state: String,

    /// Postal code of the location.
    #[serde(default)]
    zip: String,
}

impl LocationInput {
    /// Promotes the client-supplied fields into a full record under a fresh `id` with the
    /// `coordinate` computed for them.
    pub(crate) fn into_location(self, id: LocationId, coordinate: Coordinate) -> Location {
        Location {
            name: self.name,
            address: self.address,
            city: self.city,
            state: self.state,
            zip: self.zip,
            id,
            coordinate,
        }
    }
}
