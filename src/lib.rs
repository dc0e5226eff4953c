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

//! REST service to track locations of interest, each annotated with the geographic coordinate
//! that a geocoding service resolves for its postal address.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

mod db;
use db::Db;
mod driver;
use driver::Driver;
pub mod env;
mod geo;
pub use geo::GoogleGeocoderOptions;
use geo::GoogleGeocoder;
pub(crate) mod model;
mod rest;
use rest::app;

/// Instantiates all resources to serve the application on `bind_addr`.
///
/// While it'd be nice to push this responsibility to `main`, doing so would force us to expose many
/// crate-internal types to the public, which in turn would make dead code detection harder.
pub async fn serve(
    bind_addr: impl Into<SocketAddr>,
    db_uri: &str,
    geocoder_opts: GoogleGeocoderOptions,
) -> Result<(), Box<dyn Error>> {
    let db = db::postgres::connect(db_uri).await?;
    db::init_schema(&mut db.ex().await?).await?;
    let geocoder = GoogleGeocoder::new(geocoder_opts);
    let driver = Driver::new(Arc::from(db), Arc::from(geocoder));
    let app = app(driver);

    let listener = tokio::net::TcpListener::bind(bind_addr.into()).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
