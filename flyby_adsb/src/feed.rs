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
#![allow(unused)]

//! access to the dump1090 `data.json` feed of currently visible aircraft

use std::{collections::HashMap, time::Duration};
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug,trace};
use flyby_common::geo::GeoPoint;

use crate::{STALE_SECS, errors::Result};

lazy_static! {
    // 2-3 letter airline designator followed by flight number
    static ref FLIGHT_NUM_RE: Regex = Regex::new(r"(?i)^[A-Z]{2,3}\d+$").unwrap();
    // plain flight numbers (Southwest)
    static ref NUMERIC_FLIGHT_RE: Regex = Regex::new(r"^\d+$").unwrap();
}

/// answer if a (trimmed) callsign has one of the shapes we can track and look up
pub fn is_valid_callsign (callsign: &str)->bool {
    let cs = callsign.trim();
    FLIGHT_NUM_RE.is_match(cs) || NUMERIC_FLIGHT_RE.is_match(cs)
}

/// one aircraft record of a feed snapshot. All fields but `hex` are optional since dump1090 omits
/// whatever it has not received yet
#[derive(Deserialize,Debug,Clone,Default,PartialEq)]
pub struct AircraftObservation {
    pub hex: String,

    #[serde(default, rename="flight")]
    pub callsign: Option<String>,

    #[serde(default, deserialize_with="lenient_f64")]
    pub lat: Option<f64>,

    #[serde(default, deserialize_with="lenient_f64")]
    pub lon: Option<f64>,

    /// feet
    #[serde(default, deserialize_with="lenient_altitude")]
    pub altitude: Option<i64>,

    /// ground speed in knots
    #[serde(default, deserialize_with="lenient_f64")]
    pub speed: Option<f64>,

    /// feet per minute
    #[serde(default, deserialize_with="lenient_i64")]
    pub vert_rate: Option<i64>,

    /// degrees
    #[serde(default, deserialize_with="lenient_f64")]
    pub track: Option<f64>,

    /// seconds since last message from this aircraft. A record without (valid) `seen` is counted as
    /// just received since it is in the current snapshot. If such records should age out use absence
    /// eviction (`FlightTracker::remove_absent`)
    #[serde(default, deserialize_with="lenient_seen")]
    pub seen: f64,
}

impl AircraftObservation {
    pub fn position (&self)->Option<GeoPoint> {
        match (self.lon, self.lat) {
            (Some(lon), Some(lat)) => Some( GeoPoint::from_lon_lat_degrees( lon, lat)),
            _ => None
        }
    }

    pub fn is_stale (&self, stale_after: f64)->bool { self.seen >= stale_after }

    pub fn has_valid_callsign (&self)->bool {
        self.callsign.as_ref().map( |cs| is_valid_callsign(cs)).unwrap_or(false)
    }

    /// trim callsign and turn hex into the lower case key we use for tracking
    pub fn normalize (mut self)->Self {
        self.hex = self.hex.trim().to_lowercase();
        self.callsign = self.callsign.map( |cs| cs.trim().to_string()).filter( |cs| !cs.is_empty());
        self
    }
}

//--- dump1090 is not consistent with value types (e.g. "altitude":"ground"), hence we accept strings where we can

fn lenient_f64<'de,D> (deserializer: D)->std::result::Result<Option<f64>,D::Error> where D: Deserializer<'de> {
    Ok( match Option::<Value>::deserialize( deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None
    })
}

fn lenient_seen<'de,D> (deserializer: D)->std::result::Result<f64,D::Error> where D: Deserializer<'de> {
    Ok( lenient_f64( deserializer)?.filter( |v| v.is_finite() && *v >= 0.0).unwrap_or(0.0))
}

fn lenient_i64<'de,D> (deserializer: D)->std::result::Result<Option<i64>,D::Error> where D: Deserializer<'de> {
    Ok( lenient_f64( deserializer)?.map( |v| v.round() as i64))
}

fn lenient_altitude<'de,D> (deserializer: D)->std::result::Result<Option<i64>,D::Error> where D: Deserializer<'de> {
    Ok( match Option::<Value>::deserialize( deserializer)? {
        Some(Value::Number(n)) => n.as_f64().map( |v| v.round() as i64),
        Some(Value::String(s)) if s.trim().eq_ignore_ascii_case("ground") => Some(0),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().map( |v| v.round() as i64),
        _ => None
    })
}

/// parse the JSON array of a dump1090 `data.json` document
pub fn parse_observations (data: &[u8])->Result<Vec<AircraftObservation>> {
    Ok( serde_json::from_slice( data)? )
}

/// the "nearest plane" filter: normalize and drop entries without key or without a valid callsign.
/// Stale entries are retained so that the tracker can evict them
pub fn filter_trackable (observations: Vec<AircraftObservation>)->Vec<AircraftObservation> {
    observations.into_iter()
        .map( |obs| obs.normalize())
        .filter( |obs| {
            let keep = !obs.hex.is_empty() && obs.has_valid_callsign();
            if !keep { trace!("ignoring observation {:?} {:?}", obs.hex, obs.callsign) }
            keep
        })
        .collect()
}

/// the "all planes" filter: like `filter_trackable` but also drops stale entries
pub fn filter_all_planes (observations: Vec<AircraftObservation>, stale_after: f64)->Vec<AircraftObservation> {
    filter_trackable( observations).into_iter().filter( |obs| !obs.is_stale(stale_after)).collect()
}

/// reduce a snapshot to one observation per hex code. The last observation for a key wins but keeps
/// the position of the first occurrence, so that processing order stays deterministic
pub fn dedup_by_hex (observations: Vec<AircraftObservation>)->Vec<AircraftObservation> {
    let mut index: HashMap<String,usize> = HashMap::with_capacity( observations.len());
    let mut unique: Vec<AircraftObservation> = Vec::with_capacity( observations.len());

    for obs in observations {
        if let Some(&i) = index.get( &obs.hex) {
            unique[i] = obs;
        } else {
            index.insert( obs.hex.clone(), unique.len());
            unique.push( obs);
        }
    }
    unique
}

/// abstraction of where we get snapshots from. A failed fetch has to be an `Err` - never an empty snapshot
#[async_trait]
pub trait FeedSource {
    async fn fetch_snapshot (&self)->Result<Vec<AircraftObservation>>;
}

/// feed client for the HTTP interface of a dump1090 server
pub struct Dump1090Feed {
    client: reqwest::Client,
    url: String,
    stale_after: f64,
}

impl Dump1090Feed {
    pub fn new (host: &str, timeout: Duration)->Result<Self> {
        let client = reqwest::Client::builder().timeout( timeout).build()?;
        let url = format!("http://{}/dump1090/data.json", host.trim_end_matches('/'));
        Ok( Dump1090Feed { client, url, stale_after: STALE_SECS } )
    }

    pub fn with_stale_after (mut self, stale_after: f64)->Self {
        self.stale_after = stale_after;
        self
    }

    pub fn url (&self)->&str { self.url.as_str() }

    async fn fetch_raw (&self)->Result<Vec<AircraftObservation>> {
        let response = self.client.get( &self.url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        let observations = parse_observations( &bytes)?;
        debug!("fetched {} observations from {}", observations.len(), self.url);
        Ok(observations)
    }

    /// all currently visible planes with valid callsigns that are not stale
    pub async fn fetch_all_planes (&self)->Result<Vec<AircraftObservation>> {
        Ok( filter_all_planes( self.fetch_raw().await?, self.stale_after) )
    }
}

#[async_trait]
impl FeedSource for Dump1090Feed {
    async fn fetch_snapshot (&self)->Result<Vec<AircraftObservation>> {
        Ok( filter_trackable( self.fetch_raw().await?) )
    }
}
