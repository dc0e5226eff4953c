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

//! Entry point to the locations service.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use locations_api::env::{get_optional_var, get_required_var};
use locations_api::{GoogleGeocoderOptions, serve};
use std::net::{IpAddr, Ipv4Addr};

#[tokio::main]
async fn main() {
    env_logger::init();

    let host = get_optional_var::<IpAddr>("LOCATIONS", "HOST")
        .unwrap()
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST));
    let port = get_optional_var::<u16>("LOCATIONS", "PORT").unwrap().unwrap_or(3000);

    let db_uri = get_required_var::<String>("LOCATIONS", "DB_URI").unwrap();
    let geocoder_opts = GoogleGeocoderOptions::from_env("LOCATIONS_GEOCODER").unwrap();

    serve((host, port), db_uri.as_str(), geocoder_opts).await.unwrap()
}
