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

use std::{fmt, str::FromStr};
use uom::si::{f64::Length, length::foot};

use crate::{TrackedFlight, phase::feed_units, errors::{FlybyAdsbError, Result, parse_error}};

/// display filter on flight altitude, parsed from `<N`, `>N` or `N` (which means `<N`) in feet.
/// This is applied by consumers of the tracked flights, not by the tracker itself
#[derive(Debug,Clone,Copy,PartialEq)]
pub enum AltitudeFilter {
    Below(f64),
    Above(f64),
}

impl AltitudeFilter {
    /// parse an optional config value. No filter (or a blank one) is `None`, i.e. matches everything
    pub fn from_config (spec: &Option<String>)->Result<Option<Self>> {
        match spec.as_deref().map( str::trim) {
            Some(s) if !s.is_empty() => Ok( Some( s.parse()?)),
            _ => Ok(None)
        }
    }

    pub fn matches_altitude (&self, altitude: Option<Length>)->bool {
        let Some(alt) = altitude else { return false };
        let ft = feed_units( alt.get::<foot>());

        match self {
            AltitudeFilter::Below(limit) => ft < *limit,
            AltitudeFilter::Above(limit) => ft > *limit,
        }
    }

    pub fn matches (&self, flight: &TrackedFlight)->bool {
        self.matches_altitude( flight.altitude)
    }
}

impl FromStr for AltitudeFilter {
    type Err = FlybyAdsbError;

    fn from_str (s: &str)->Result<Self> {
        let s = s.trim();
        let (ctor, num): (fn(f64)->AltitudeFilter, &str) = if let Some(rest) = s.strip_prefix('>') {
            (AltitudeFilter::Above, rest)
        } else if let Some(rest) = s.strip_prefix('<') {
            (AltitudeFilter::Below, rest)
        } else {
            (AltitudeFilter::Below, s)
        };

        let limit: f64 = num.trim().parse().map_err( |_| parse_error!("invalid altitude filter '{}'", s))?;
        if !limit.is_finite() { return Err( parse_error!("invalid altitude filter '{}'", s)) }

        Ok( ctor(limit) )
    }
}

impl fmt::Display for AltitudeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AltitudeFilter::Below(limit) => write!(f, "<{limit}"),
            AltitudeFilter::Above(limit) => write!(f, ">{limit}"),
        }
    }
}
