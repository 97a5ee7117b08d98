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

//! geofence based zone classification. A geofence is a GeoJSON FeatureCollection with (at least)
//! three area features in fixed order: north flow landing corridor, south flow landing corridor
//! and the general flyby area

use std::fmt;
use serde::{Serialize,Deserialize};
use tracing::{debug,info,warn};
use flyby_common::{FlybyCommonError, fs::expand_home, geo::{GeoArea, GeoPoint, read_geojson_areas}};

pub const NORTH_FLOW_IDX: usize = 0;
pub const SOUTH_FLOW_IDX: usize = 1;
pub const FLYBY_IDX: usize = 2;

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize)]
#[serde(rename_all="snake_case")]
pub enum Zone {
    NorthFlow,
    SouthFlow,
    Flyby,
    Hidden,
}

impl Zone {
    pub fn as_str (&self)->&'static str {
        match self {
            Zone::NorthFlow => "north_flow",
            Zone::SouthFlow => "south_flow",
            Zone::Flyby => "flyby",
            Zone::Hidden => "hidden",
        }
    }

    /// landing corridors are where climbing/descending traffic is taking off or landing
    pub fn is_landing_corridor (&self)->bool {
        matches!( self, Zone::NorthFlow | Zone::SouthFlow)
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str( self.as_str())
    }
}

/// the pure classification: test north, south and flyby area in this order, first containing area wins.
/// Missing areas (less than three) never match
pub fn classify_zone (point: &GeoPoint, areas: &[GeoArea])->Zone {
    let zones = [(NORTH_FLOW_IDX, Zone::NorthFlow), (SOUTH_FLOW_IDX, Zone::SouthFlow), (FLYBY_IDX, Zone::Flyby)];
    for (idx,zone) in zones {
        if let Some(area) = areas.get(idx) {
            if area.contains( point) { return zone }
        }
    }
    Zone::Hidden
}

/// the configured geofence, including how we degrade if it is not available
#[derive(Debug,Clone)]
pub enum Geofence {
    Areas(Vec<GeoArea>),

    /// no geofence configured or geofence file not readable - every check succeeds, i.e. each point is
    /// in the first tested zone (north flow)
    Permissive,

    /// geofence file could be read but does not define the required areas - nothing matches
    Unusable,
}

impl Geofence {
    /// load the geofence from an optional GeoJSON path. This never fails - problems are logged
    /// (once, here) and turned into the respective degraded mode
    pub fn load (path: Option<&str>)->Self {
        let Some(path) = path else {
            debug!("no geofence configured, zone checks are permissive");
            return Geofence::Permissive
        };

        match read_geojson_areas( expand_home(path)) {
            Ok(areas) => {
                if areas.len() > FLYBY_IDX {
                    info!("loaded geofence {} with {} areas", path, areas.len());
                    Geofence::Areas(areas)
                } else {
                    warn!("geofence {} has only {} areas (need 3), no flight will be in a zone", path, areas.len());
                    Geofence::Unusable
                }
            }
            Err(FlybyCommonError::IOError(e)) => {
                warn!("couldn't read geojson file at {}: {}, ignoring", path, e);
                Geofence::Permissive
            }
            Err(e) => {
                warn!("malformed geofence {}: {}, no flight will be in a zone", path, e);
                Geofence::Unusable
            }
        }
    }

    /// flights without position are always hidden
    pub fn classify (&self, position: Option<&GeoPoint>)->Zone {
        let Some(p) = position else { return Zone::Hidden };

        match self {
            Geofence::Areas(areas) => classify_zone( p, areas),
            Geofence::Permissive => Zone::NorthFlow,
            Geofence::Unusable => Zone::Hidden,
        }
    }

    pub fn is_available (&self)->bool { matches!( self, Geofence::Areas(_)) }
}
