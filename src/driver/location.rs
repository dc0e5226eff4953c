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

//! Operations on one location.

use crate::db;
use crate::driver::{Driver, DriverError, DriverResult};
use crate::geo::AddressQuery;
use crate::model::{Coordinate, Location, LocationId, LocationInput};

impl Driver {
    /// Computes the coordinate for the postal fields in `input` via the geocoding service.
    ///
    /// A lookup that yields no candidates is an input error, because the write that needed the
    /// coordinate must be rejected.  A lookup that cannot be completed at all surfaces as an
    /// unavailability error scoped to the current request.
    async fn resolve_coordinate(&self, input: &LocationInput) -> DriverResult<Coordinate> {
        let query = AddressQuery::new(input.address(), input.city(), input.state());
        match self.geocoder.resolve(&query).await {
            Ok(Some(coordinate)) => Ok(coordinate),
            Ok(None) => Err(DriverError::InvalidInput(
                "Address does not match any known location".to_owned(),
            )),
            Err(e) => Err(DriverError::Unavailable(format!("Geocoding service failed: {}", e))),
        }
    }

    /// Gets the location stored under `id`.
    pub(crate) async fn get_location(self, id: &LocationId) -> DriverResult<Location> {
        let location = db::get_location(&mut self.db.ex().await?, id).await?;
        Ok(location)
    }

    /// Creates a new location from `input`, computing its coordinate and assigning it a fresh
    /// identifier.
    pub(crate) async fn create_location(self, input: LocationInput) -> DriverResult<Location> {
        let coordinate = self.resolve_coordinate(&input).await?;
        let location = input.into_location(LocationId::random(), coordinate);
        db::put_location(&mut self.db.ex().await?, &location).await?;
        Ok(location)
    }

    /// Modifies the location stored under `id` by merging `input` over it and recomputing its
    /// coordinate from the new postal fields.
    pub(crate) async fn modify_location(
        self,
        id: &LocationId,
        input: LocationInput,
    ) -> DriverResult<Location> {
        // The lookup uses the client-supplied fields verbatim and runs before the existence
        // check, so an unresolvable address is rejected even for records that do not exist.
        let coordinate = self.resolve_coordinate(&input).await?;

        let mut tx = self.db.begin().await?;
        let existing = db::get_location(tx.ex(), id).await?;
        let merged = existing.merged_with(input, coordinate);
        db::delete_location(tx.ex(), id).await?;
        db::put_location(tx.ex(), &merged).await?;
        tx.commit().await?;
        Ok(merged)
    }

    /// Deletes the location stored under `id`.
    pub(crate) async fn delete_location(self, id: &LocationId) -> DriverResult<()> {
        db::delete_location(&mut self.db.ex().await?, id).await?;
        Ok(())
    }
}
