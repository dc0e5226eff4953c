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

//! Serves the GET /location/:id API.

use crate::driver::Driver;
use crate::model::Location;
use crate::rest::{EmptyBody, RestError, location_id_from_path};
use axum::Json;
use axum::extract::{Path, State};

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<String>,
    _: EmptyBody,
) -> Result<Json<Location>, RestError> {
    let id = location_id_from_path(id)?;
    let location = driver.get_location(&id).await?;
    Ok(Json(location))
}
