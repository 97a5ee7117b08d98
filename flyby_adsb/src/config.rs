/*
 * Copyright © 2025, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use std::time::Duration;
use serde::{Serialize,Deserialize};
use flyby_common::{datetime::{self, secs}, geo::LatLon};

use crate::STALE_SECS;

/// the runtime configuration, usually loaded from a `flyby.ron` file such as
/// ```ron
/// FlybyConfig(
///     host: "localhost:8080",
///     location: (lat: 37.3626, lon: -121.9291),
///     geofence: Some("~/.flyby/configs/flyby.geojson"),
///     altitude_filter: Some("<10000"),
///     update_interval: 5.0,
///     drop_after: Some(120.0),
/// )
/// ```
/// durations are given in (fractional) seconds. Omitted fields get their default values
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
#[serde(default)]
pub struct FlybyConfig {
    /// dump1090 host (and port)
    pub host: String,

    /// observer location
    pub location: LatLon,

    /// path of GeoJSON file with north flow, south flow and flyby areas
    pub geofence: Option<String>,

    pub altitude_filter: Option<String>,

    #[serde(serialize_with="datetime::ser_duration_as_fractional_secs", deserialize_with="datetime::de_duration_from_fractional_secs")]
    pub update_interval: Duration,

    #[serde(serialize_with="datetime::ser_duration_as_fractional_secs", deserialize_with="datetime::de_duration_from_fractional_secs")]
    pub fetch_timeout: Duration,

    /// seconds since last message after which flights are removed
    pub stale_after: f64,

    /// remove flights that did not get updated for this duration. None means flights are only
    /// removed once they are reported as stale
    #[serde(serialize_with="datetime::ser_optional_duration_as_fractional_secs", deserialize_with="datetime::de_optional_duration_from_fractional_secs")]
    pub drop_after: Option<Duration>,

    // the (optional) lookup tables
    pub flight_numbers: Option<String>,
    pub callsign_routes: Option<String>,
    pub aircraft_types: Option<String>,
}

impl Default for FlybyConfig {
    fn default()->Self {
        FlybyConfig {
            host: "localhost:8080".to_string(),
            location: LatLon::new( 37.3626, -121.9291),
            geofence: None,
            altitude_filter: None,
            update_interval: secs(5),
            fetch_timeout: secs(10),
            stale_after: STALE_SECS,
            drop_after: None,
            flight_numbers: None,
            callsign_routes: None,
            aircraft_types: None,
        }
    }
}
