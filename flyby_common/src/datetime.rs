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

use chrono::{DateTime,TimeZone,Utc};
use serde::{Serialize,Serializer,Deserialize,Deserializer,de::Error as DeError};
use std::time::Duration;
use std::fmt;

/// wall clock time as milliseconds since the Unix epoch
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Hash)]
pub struct EpochMillis(i64);

impl EpochMillis {
    pub fn now ()->Self { EpochMillis( Utc::now().timestamp_millis()) }

    pub fn new(millis:i64)->Self { EpochMillis(millis) }

    pub fn from_secs(secs: i64)->Self { EpochMillis(secs*1000) }
    
    pub fn millis(&self)->i64 { self.0 }

    /// elapsed time from `self` to `later`, saturating at zero if `later` is earlier
    pub fn elapsed_until (&self, later: EpochMillis)->Duration {
        let dt = later.0 - self.0;
        if dt > 0 { Duration::from_millis(dt as u64) } else { Duration::ZERO }
    }
}

impl fmt::Display for EpochMillis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match DateTime::<Utc>::from_timestamp_millis(self.0) {
            Some(date) => write!(f, "{}", date.format("%Y-%m-%dT%H:%M:%S%.3fZ")),
            None => write!(f, "{}ms", self.0)
        }
    }
}

impl<Tz> From<DateTime<Tz>> for EpochMillis where Tz: TimeZone {
    fn from (date: DateTime<Tz>)->Self { EpochMillis(date.timestamp_millis()) }
}

// simple Duration ctors that read better in configs and tests
#[inline] pub fn millis (n: u64)->Duration { Duration::from_millis(n) }
#[inline] pub fn secs (n: u64)->Duration { Duration::from_secs(n) }
#[inline] pub fn secs_f64 (n: f64)->Duration { Duration::from_secs_f64(n) }
#[inline] pub fn minutes (n: u64)->Duration { Duration::from_secs(n * 60) }

#[inline]
pub fn utc_now()->DateTime<Utc> {
    Utc::now()
}

//--- serde support for durations given as fractional seconds in configs (e.g. `update_interval: 5.0`)

pub fn ser_duration_as_fractional_secs<S: Serializer> (dur: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64( dur.as_secs_f64())
}

pub fn de_duration_from_fractional_secs <'a,D>(deserializer: D) -> Result<Duration,D::Error> where D: Deserializer<'a> {
    let secs: f64 = f64::deserialize(deserializer)?;
    Duration::try_from_secs_f64(secs).map_err( |e| DeError::custom( format!("invalid duration {secs}: {e}")))
}

pub fn ser_optional_duration_as_fractional_secs<S: Serializer> (dur: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
    match dur {
        Some(d) => s.serialize_some( &d.as_secs_f64()),
        None => s.serialize_none()
    }
}

pub fn de_optional_duration_from_fractional_secs <'a,D>(deserializer: D) -> Result<Option<Duration>,D::Error> where D: Deserializer<'a> {
    match Option::<f64>::deserialize(deserializer)? {
        Some(secs) => Duration::try_from_secs_f64(secs)
            .map( Some)
            .map_err( |e| DeError::custom( format!("invalid duration {secs}: {e}"))),
        None => Ok(None)
    }
}
