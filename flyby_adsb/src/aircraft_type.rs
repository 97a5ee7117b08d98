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

//! aircraft type lookup by ICAO 24bit address (ModeS hex code)

use std::{collections::HashMap, fmt, io, path::Path};
use serde::{Serialize,Deserialize};
use tracing::{info,trace};

use crate::errors::Result;

#[derive(Debug,Clone,PartialEq,Eq,Serialize,Deserialize)]
pub struct AircraftType {
    pub type_code: Option<String>,
    pub type_name: Option<String>,
    pub registration: Option<String>,
}

impl fmt::Display for AircraftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.type_code, &self.type_name) {
            (Some(code), Some(name)) => write!(f, "{code} ({name})"),
            (Some(code), None) => f.write_str(code),
            (None, Some(name)) => f.write_str(name),
            (None, None) => f.write_str("?")
        }
    }
}

pub trait AircraftTypeLookup {
    fn aircraft_type (&self, hex: &str)->Option<AircraftType>;
}

/// a missing type database is not an error - it just doesn't find anything
impl<T: AircraftTypeLookup> AircraftTypeLookup for Option<T> {
    fn aircraft_type (&self, hex: &str)->Option<AircraftType> {
        self.as_ref().and_then( |t| t.aircraft_type( hex))
    }
}

#[derive(Deserialize,Debug)]
struct AircraftRow {
    #[serde(rename="ModeS")] mode_s: String,
    #[serde(rename="ICAOTypeCode", default)] type_code: Option<String>,
    #[serde(rename="Type", default)] type_name: Option<String>,
    #[serde(rename="Registration", default)] registration: Option<String>,
}

fn non_empty (s: Option<String>)->Option<String> {
    s.filter( |s| !s.is_empty())
}

pub struct AircraftTypeTable {
    types: HashMap<String,AircraftType>, // upper case hex -> type
}

impl AircraftTypeTable {
    pub fn from_reader<R: io::Read> (reader: R)->Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim( csv::Trim::All)
            .from_reader( reader);

        let mut types: HashMap<String,AircraftType> = HashMap::new();
        for result in rdr.deserialize::<AircraftRow>() {
            match result {
                Ok(row) => {
                    let key = row.mode_s.to_uppercase();
                    if key.is_empty() { continue }
                    let aircraft_type = AircraftType {
                        type_code: non_empty( row.type_code),
                        type_name: non_empty( row.type_name),
                        registration: non_empty( row.registration),
                    };
                    types.entry(key).or_insert( aircraft_type);
                }
                Err(e) => trace!("skipping aircraft row: {}", e)
            }
        }

        Ok( AircraftTypeTable{ types } )
    }

    pub fn from_path (path: impl AsRef<Path>)->Result<Self> {
        let path = path.as_ref();
        let table = Self::from_reader( std::fs::File::open(path)?)?;
        info!("loaded {} aircraft types from {:?}", table.len(), path);
        Ok(table)
    }

    pub fn len (&self)->usize { self.types.len() }
    pub fn is_empty (&self)->bool { self.types.is_empty() }
}

impl AircraftTypeLookup for AircraftTypeTable {
    fn aircraft_type (&self, hex: &str)->Option<AircraftType> {
        self.types.get( &hex.trim().to_uppercase()).cloned()
    }
}
