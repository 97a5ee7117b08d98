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

//! route lookups by callsign. There are two independent sources:
//!  - a flight number table with rows `airline,number,...,route`
//!  - a callsign table that maps callsigns to operator, origin and destination airports

use std::{collections::HashMap, fmt, io, path::Path};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Serialize,Deserialize};
use tracing::{info,trace};

use crate::errors::Result;

/// the airline designator we assume for purely numeric callsigns
pub const NUMERIC_CALLSIGN_AIRLINE: &'static str = "SWA";

lazy_static! {
    static ref NUMERIC_RE: Regex = Regex::new(r"^\d+$").unwrap();
    static ref AIRLINE_NUMBER_RE: Regex = Regex::new(r"^([^\d\s]+)\s*(\d+)$").unwrap();
}

pub trait RouteLookup {
    /// the route string (e.g. "SJC-LAX") from the flight number table
    fn flight_number_route (&self, callsign: &str)->Option<String>;

    /// the full route record from the callsign table
    fn callsign_route (&self, callsign: &str)->Option<CallsignRoute>;
}

/// split a callsign into (airline, flight number). Purely numeric callsigns are Southwest flights
pub fn split_flight_number (callsign: &str)->Option<(String,String)> {
    let mut code = callsign.trim().to_uppercase();
    if NUMERIC_RE.is_match( &code) {
        code = format!("{NUMERIC_CALLSIGN_AIRLINE}{code}");
    }

    AIRLINE_NUMBER_RE.captures( &code).map( |caps| (caps[1].to_string(), caps[2].to_string()))
}

/// the "airline,number," key prefix of flight number table rows
pub fn flight_number_key (callsign: &str)->Option<String> {
    split_flight_number( callsign).map( |(airline,number)| format!("{airline},{number},"))
}

/* #region flight number table ************************************************************************************/

pub struct FlightNumberTable {
    routes: HashMap<String,String>, // "airline,number," -> route
}

impl FlightNumberTable {
    /// rows are header-less `airline,number,...,route`. The first row for an airline/number pair wins
    pub fn from_reader<R: io::Read> (reader: R)->Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader( reader);

        let mut routes: HashMap<String,String> = HashMap::new();
        for result in rdr.records() {
            match result {
                Ok(rec) if rec.len() >= 3 => {
                    let key = format!("{},{},", rec[0].trim(), rec[1].trim());
                    let route = rec[rec.len()-1].trim();
                    if !route.is_empty() {
                        routes.entry(key).or_insert_with( || route.to_string());
                    }
                }
                Ok(rec) => trace!("skipping short flight number row {:?}", rec),
                Err(e) => trace!("skipping flight number row: {}", e)
            }
        }

        Ok( FlightNumberTable{ routes } )
    }

    pub fn from_path (path: impl AsRef<Path>)->Result<Self> {
        let path = path.as_ref();
        let table = Self::from_reader( std::fs::File::open(path)?)?;
        info!("loaded {} flight number routes from {:?}", table.len(), path);
        Ok(table)
    }

    pub fn len (&self)->usize { self.routes.len() }
    pub fn is_empty (&self)->bool { self.routes.is_empty() }

    pub fn route_for_key (&self, key: &str)->Option<&str> {
        self.routes.get(key).map( |r| r.as_str())
    }

    pub fn route (&self, callsign: &str)->Option<String> {
        let key = flight_number_key( callsign)?;
        self.route_for_key( &key).map( |r| r.to_string())
    }
}

/* #endregion flight number table */

/* #region callsign table *****************************************************************************************/

#[derive(Debug,Clone,PartialEq,Default,Serialize,Deserialize)]
pub struct Airport {
    pub name: Option<String>,
    pub location: Option<String>,
    pub country: Option<String>,
    pub lon: Option<f64>,
    pub lat: Option<f64>,
}

#[derive(Debug,Clone,PartialEq,Default,Serialize,Deserialize)]
pub struct CallsignRoute {
    pub operator_name: Option<String>,
    pub from: Airport,
    pub to: Airport,
    pub flight_number: Option<String>,
}

impl fmt::Display for CallsignRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unknown = "?";
        write!( f, "{} {} -> {}",
            self.operator_name.as_deref().unwrap_or(unknown),
            self.from.name.as_deref().unwrap_or(unknown),
            self.to.name.as_deref().unwrap_or(unknown))
    }
}

#[derive(Deserialize,Debug)]
#[serde(rename_all="PascalCase")]
struct CallsignRouteRow {
    callsign: String,
    operator_name: Option<String>,
    from_airport_name: Option<String>,
    from_airport_location: Option<String>,
    from_airport_country: Option<String>,
    from_airport_longitude: Option<f64>,
    from_airport_latitude: Option<f64>,
    to_airport_name: Option<String>,
    to_airport_location: Option<String>,
    to_airport_country: Option<String>,
    to_airport_longitude: Option<f64>,
    to_airport_latitude: Option<f64>,
    flight_number: Option<String>,
}

impl From<CallsignRouteRow> for CallsignRoute {
    fn from (row: CallsignRouteRow)->Self {
        CallsignRoute {
            operator_name: row.operator_name,
            from: Airport {
                name: row.from_airport_name,
                location: row.from_airport_location,
                country: row.from_airport_country,
                lon: row.from_airport_longitude,
                lat: row.from_airport_latitude,
            },
            to: Airport {
                name: row.to_airport_name,
                location: row.to_airport_location,
                country: row.to_airport_country,
                lon: row.to_airport_longitude,
                lat: row.to_airport_latitude,
            },
            flight_number: row.flight_number,
        }
    }
}

pub struct CallsignRouteTable {
    routes: HashMap<String,CallsignRoute>,
}

impl CallsignRouteTable {
    pub fn from_reader<R: io::Read> (reader: R)->Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim( csv::Trim::All)
            .from_reader( reader);

        let mut routes: HashMap<String,CallsignRoute> = HashMap::new();
        for result in rdr.deserialize::<CallsignRouteRow>() {
            match result {
                Ok(row) => {
                    let key = row.callsign.clone();
                    if !key.is_empty() {
                        routes.entry(key).or_insert_with( || row.into());
                    }
                }
                Err(e) => trace!("skipping callsign route row: {}", e)
            }
        }

        Ok( CallsignRouteTable{ routes } )
    }

    pub fn from_path (path: impl AsRef<Path>)->Result<Self> {
        let path = path.as_ref();
        let table = Self::from_reader( std::fs::File::open(path)?)?;
        info!("loaded {} callsign routes from {:?}", table.len(), path);
        Ok(table)
    }

    pub fn len (&self)->usize { self.routes.len() }
    pub fn is_empty (&self)->bool { self.routes.is_empty() }

    pub fn route (&self, callsign: &str)->Option<CallsignRoute> {
        self.routes.get( callsign.trim()).cloned()
    }
}

/* #endregion callsign table */

/// the RouteLookup we use in production. Each table is optional since it is an external resource
#[derive(Default)]
pub struct RouteTables {
    pub flight_numbers: Option<FlightNumberTable>,
    pub callsign_routes: Option<CallsignRouteTable>,
}

impl RouteTables {
    pub fn new (flight_numbers: Option<FlightNumberTable>, callsign_routes: Option<CallsignRouteTable>)->Self {
        RouteTables { flight_numbers, callsign_routes }
    }
}

impl RouteLookup for RouteTables {
    fn flight_number_route (&self, callsign: &str)->Option<String> {
        self.flight_numbers.as_ref().and_then( |t| t.route( callsign))
    }

    fn callsign_route (&self, callsign: &str)->Option<CallsignRoute> {
        self.callsign_routes.as_ref().and_then( |t| t.route( callsign))
    }
}

/// where a flight is going relative to a given airport
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum TrafficDirection {
    Departing,
    Arriving,
    Flyby,
}

/// classify a "FROM-TO" route with respect to an airport code
pub fn traffic_direction (route: &str, airport_code: &str)->TrafficDirection {
    let airports: Vec<&str> = route.split('-').map( |a| a.trim()).collect();
    if airports.first() == Some(&airport_code) {
        TrafficDirection::Departing
    } else if airports.contains( &airport_code) {
        TrafficDirection::Arriving
    } else {
        TrafficDirection::Flyby
    }
}
