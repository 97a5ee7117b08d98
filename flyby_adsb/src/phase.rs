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

//! heuristic flight phase classification

use std::fmt;
use serde::{Serialize,Deserialize};
use uom::si::{f64::{Length,Velocity}, length::foot, velocity::{foot_per_minute, knot}};

use crate::zone::Zone;

/// above this we consider flights to be cruising, regardless of vertical rate
pub const LOW_ALTITUDE_FT: f64 = 10000.0;

/// flights at or below this ground speed are not taking off or landing
pub const MIN_AIRBORNE_SPEED_KT: f64 = 100.0;

/// vertical rate threshold for climbing / descending
pub const VERTICAL_RATE_FPM: f64 = 1000.0;

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize)]
pub enum Phase {
    #[serde(rename="taking off")] TakingOff,
    #[serde(rename="landing")] Landing,
    #[serde(rename="ascending")] Ascending,
    #[serde(rename="descending")] Descending,
    #[serde(rename="low cruise")] LowCruise,
    #[serde(rename="cruising")] Cruising,
}

impl Phase {
    pub fn as_str (&self)->&'static str {
        match self {
            Phase::TakingOff => "taking off",
            Phase::Landing => "landing",
            Phase::Ascending => "ascending",
            Phase::Descending => "descending",
            Phase::LowCruise => "low cruise",
            Phase::Cruising => "cruising",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str( self.as_str())
    }
}

/// the ordered phase rules on raw feed units (feet, knots, feet per minute)
pub fn phase_for (altitude_ft: f64, speed_kt: f64, vertical_rate_fpm: f64, zone: Zone)->Phase {
    if !(altitude_ft > 0.0 && altitude_ft < LOW_ALTITUDE_FT && speed_kt > MIN_AIRBORNE_SPEED_KT) {
        Phase::Cruising

    } else if vertical_rate_fpm > VERTICAL_RATE_FPM {
        if zone.is_landing_corridor() { Phase::TakingOff } else { Phase::Ascending }

    } else if vertical_rate_fpm < -VERTICAL_RATE_FPM {
        if zone.is_landing_corridor() { Phase::Landing } else { Phase::Descending }

    } else {
        Phase::LowCruise
    }
}

/// uom stores SI base units, hence feet/knots/fpm values we get back are not exact (10000ft -> 9999.999999999998).
/// Round to a resolution well below what the feed reports so that threshold comparisons use the observed values
pub fn feed_units (v: f64)->f64 {
    (v * 1000.0).round() / 1000.0
}

/// classify from (optional) tracked values. Unknown altitude or speed means we can't tell if the
/// flight is low and fast enough, which makes it `Cruising`. Unknown vertical rate counts as level
pub fn classify_phase (altitude: Option<Length>, groundspeed: Option<Velocity>, vertical_rate: Option<Velocity>, zone: Zone)->Phase {
    match (altitude, groundspeed) {
        (Some(alt), Some(spd)) => {
            let vr = vertical_rate.map( |v| feed_units( v.get::<foot_per_minute>())).unwrap_or(0.0);
            phase_for( feed_units( alt.get::<foot>()), feed_units( spd.get::<knot>()), vr, zone)
        }
        _ => Phase::Cruising
    }
}
