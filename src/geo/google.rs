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

//! Geocoding implementation backed by the Google Maps web API.

use crate::env::get_optional_var;
use crate::geo::{AddressQuery, GeoResult, Geocoder};
use crate::model::Coordinate;
use async_trait::async_trait;
use bytes::Buf;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::io;

/// Default base URL of the geocoding service.
const DEFAULT_BASE_URL: &str = "http://maps.google.com";

/// Converts a `reqwest::Error` to an `io::Error`.
fn reqwest_error_to_io_error(e: reqwest::Error) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("{}", e))
}

/// Converts a `reqwest::Response` to an `io::Error`.  The response should have a non-OK status.
async fn http_response_to_io_error(response: Response) -> io::Error {
    let status = response.status();

    let kind = match status {
        StatusCode::OK => panic!("Should not have been called on a successful request"),

        // Match against the codes we know the server explicitly hands us.
        StatusCode::BAD_REQUEST => io::ErrorKind::InvalidInput,
        StatusCode::FORBIDDEN => io::ErrorKind::PermissionDenied,
        StatusCode::NOT_FOUND => io::ErrorKind::NotFound,

        _ => io::ErrorKind::Other,
    };

    match response.text().await {
        Ok(text) => io::Error::new(
            kind,
            format!("HTTP request returned status {} with text '{}'", status, text),
        ),
        Err(e) => io::Error::new(
            kind,
            format!("HTTP request returned status {} and failed to get text due to {}", status, e),
        ),
    }
}

/// A coordinate pair as encoded within `GeocodeResponse`.
#[derive(Deserialize)]
struct GeometryLocationResponse {
    /// Degrees of latitude of the candidate.
    lat: f64,

    /// Degrees of longitude of the candidate.
    lng: f64,
}

/// Geometry information as encoded within `GeocodeResponse`.
#[derive(Deserialize)]
struct GeometryResponse {
    /// The resolved coordinates of the candidate.
    location: GeometryLocationResponse,
}

/// A single candidate as encoded within `GeocodeResponse`.
#[derive(Deserialize)]
struct CandidateResponse {
    /// Geometry details of the candidate.
    geometry: GeometryResponse,
}

/// Response from the geocoding service on a successful request.
#[derive(Deserialize)]
struct GeocodeResponse {
    /// Candidates for the queried address, best match first.  May be empty when the service
    /// cannot resolve the query.
    results: Vec<CandidateResponse>,
}

/// Options to configure a `GoogleGeocoder`.
#[derive(Debug)]
#[cfg_attr(test, derive(PartialEq))]
pub struct GoogleGeocoderOptions {
    /// Base URL of the geocoding service, without a trailing slash.
    pub base_url: String,
}

impl Default for GoogleGeocoderOptions {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_owned() }
    }
}

impl GoogleGeocoderOptions {
    /// Creates a set of options from environment variables whose name is prefixed with the
    /// given `prefix`.
    ///
    /// This will use variables such as `<prefix>_URL`.
    pub fn from_env(prefix: &str) -> Result<Self, String> {
        Ok(Self {
            base_url: get_optional_var::<String>(prefix, "URL")?
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
        })
    }
}

/// Geocoder that queries the Google Maps web API.
#[derive(Clone)]
pub(crate) struct GoogleGeocoder {
    /// Base URL of the geocoding service.
    base_url: String,

    /// Asynchronous HTTP client with which to issue the service requests.
    client: Client,
}

impl GoogleGeocoder {
    /// Creates a new Google Maps-backed geocoder using `opts` for configuration.
    pub(crate) fn new(opts: GoogleGeocoderOptions) -> Self {
        Self { base_url: opts.base_url, client: Client::default() }
    }

    /// Formats the URL of the request issued for `query`.
    ///
    /// The query tokens are inserted into the URL verbatim so that the `+` separators travel
    /// unencoded, which is the format the service expects for this endpoint.
    fn request_url(&self, query: &AddressQuery) -> String {
        format!(
            "{}/maps/api/geocode/json?address={}&sensor=false",
            self.base_url,
            query.as_str()
        )
    }
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    async fn resolve(&self, query: &AddressQuery) -> GeoResult<Option<Coordinate>> {
        let response = self
            .client
            .get(self.request_url(query))
            .send()
            .await
            .map_err(reqwest_error_to_io_error)?;
        match response.status() {
            StatusCode::OK => {
                let bytes = response.bytes().await.map_err(reqwest_error_to_io_error)?;
                let response: GeocodeResponse = serde_json::from_reader(bytes.reader())?;

                // Only the first candidate is consulted; the service orders them best first.
                Ok(response
                    .results
                    .into_iter()
                    .next()
                    .map(|c| Coordinate::new(c.geometry.location.lat, c.geometry.location.lng)))
            }
            _ => Err(http_response_to_io_error(response).await),
        }
    }
}
