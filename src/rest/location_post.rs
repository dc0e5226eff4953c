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

//! Serves the POST /location API.

use crate::driver::Driver;
use crate::model::{Location, LocationInput};
use crate::rest::RestError;
use axum::extract::State;
use axum::{Json, http};

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Json(input): Json<LocationInput>,
) -> Result<(http::StatusCode, Json<Location>), RestError> {
    let location = driver.create_location(input).await?;
    Ok((http::StatusCode::CREATED, Json(location)))
}
