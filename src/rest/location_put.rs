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

//! Serves the PUT /location/:id API.

use crate::driver::Driver;
use crate::model::{Location, LocationInput};
use crate::rest::{RestError, location_id_from_path};
use axum::extract::{Path, State};
use axum::{Json, http};

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<String>,
    Json(input): Json<LocationInput>,
) -> Result<(http::StatusCode, Json<Location>), RestError> {
    let id = location_id_from_path(id)?;
    let location = driver.modify_location(&id, input).await?;
    Ok((http::StatusCode::CREATED, Json(location)))
}
