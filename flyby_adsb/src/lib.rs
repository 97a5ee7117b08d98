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

//! the flight aggregation and enrichment engine for a dump1090 ADS-B receiver feed.
//! `FlightTracker` merges feed snapshots into a table of `TrackedFlight`s, enriches new flights
//! with route and aircraft type data, and classifies their geofence zone and flight phase.
//! `FlightPoller` drives the tracker from a `FeedSource` on a tokio interval

use std::fmt;
use uom::si::{length::foot, velocity::{knot,foot_per_minute}, f64::{Length,Velocity}};
use flyby_common::{datetime::EpochMillis, geo::GeoPoint};

pub mod errors;
pub mod feed;
pub mod zone;
pub mod phase;
pub mod route;
pub mod aircraft_type;
pub mod filter;
pub mod config;
pub mod tracker;
pub mod poller;

use feed::AircraftObservation;
use zone::{Geofence, Zone};
use phase::{Phase, classify_phase, feed_units};
use route::CallsignRoute;
use aircraft_type::AircraftType;

/// seconds without a message after which we consider a flight gone
pub const STALE_SECS: f64 = 60.0;

/// the data model for a tracked flight. Observation fields hold the latest received values, enrichment
/// fields are looked up once when the flight is added, zone and phase reflect the latest merged values
#[derive(Debug,Clone,PartialEq)]
pub struct TrackedFlight {
    pub hex: String,
    pub callsign: String,

    pub position: Option<GeoPoint>,
    pub altitude: Option<Length>,
    pub groundspeed: Option<Velocity>,
    pub vertical_rate: Option<Velocity>,
    pub track: Option<f64>, // degrees
    pub seen: f64,

    pub route: Option<String>,
    pub aircraft_type: Option<AircraftType>,
    pub callsign_route: Option<CallsignRoute>,

    pub zone: Zone,
    pub phase: Phase,

    pub last_update: EpochMillis,
}

impl TrackedFlight {
    /// create an un-enriched flight from its first observation. Zone and phase are computed with
    /// the provided geofence
    pub fn from_observation (obs: &AircraftObservation, geofence: &Geofence, now: EpochMillis)->Self {
        let mut flight = TrackedFlight {
            hex: obs.hex.clone(),
            callsign: obs.callsign.clone().unwrap_or_default(),
            position: obs.position(),
            altitude: obs.altitude.map( |a| Length::new::<foot>( a as f64)),
            groundspeed: obs.speed.map( |s| Velocity::new::<knot>(s)),
            vertical_rate: obs.vert_rate.map( |vr| Velocity::new::<foot_per_minute>( vr as f64)),
            track: obs.track,
            seen: obs.seen,
            route: None,
            aircraft_type: None,
            callsign_route: None,
            zone: Zone::Hidden,
            phase: Phase::Cruising,
            last_update: now,
        };
        flight.reclassify( geofence);
        flight
    }

    /// overwrite all fields that are present in the observation, keep the others
    pub fn update (&mut self, obs: &AircraftObservation, now: EpochMillis) {
        if let Some(cs) = &obs.callsign { self.callsign = cs.clone() }
        if let Some(pos) = obs.position() { self.position = Some(pos) }
        if let Some(alt) = obs.altitude { self.altitude = Some( Length::new::<foot>( alt as f64)) }
        if let Some(spd) = obs.speed { self.groundspeed = Some( Velocity::new::<knot>(spd)) }
        if let Some(vr) = obs.vert_rate { self.vertical_rate = Some( Velocity::new::<foot_per_minute>( vr as f64)) }
        if let Some(trk) = obs.track { self.track = Some(trk) }
        self.seen = obs.seen;
        self.last_update = now;
    }

    pub fn reclassify (&mut self, geofence: &Geofence) {
        self.zone = geofence.classify( self.position.as_ref());
        self.phase = classify_phase( self.altitude, self.groundspeed, self.vertical_rate, self.zone);
    }

    pub fn altitude_ft (&self)->Option<f64> { self.altitude.map( |a| feed_units( a.get::<foot>())) }
    pub fn groundspeed_kt (&self)->Option<f64> { self.groundspeed.map( |s| feed_units( s.get::<knot>())) }
    pub fn vertical_rate_fpm (&self)->Option<f64> { self.vertical_rate.map( |vr| feed_units( vr.get::<foot_per_minute>())) }

    pub fn is_stale (&self, stale_after: f64)->bool { self.seen >= stale_after }
}

impl fmt::Display for TrackedFlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "Flight( hex: {}, cs: \"{}\"", self.hex, self.callsign)?;
        if let Some(p) = &self.position { write!( f, ", pos: {}", p)?; }
        if let Some(alt) = self.altitude { write!( f, ", alt: {:.0}", alt.get::<foot>())?; }
        if let Some(gs) = self.groundspeed { write!( f, ", spd: {:.0}", gs.get::<knot>())?; }
        if let Some(vr) = self.vertical_rate { write!( f, ", vr: {:.0}", vr.get::<foot_per_minute>())?; }
        if let Some(trk) = self.track { write!( f, ", trk: {:.0}", trk)?; }
        if let Some(route) = &self.route { write!( f, ", route: {}", route)?; }
        if let Some(t) = &self.aircraft_type { write!( f, ", type: {}", t)?; }
        write!( f, ", zone: {}, phase: {}, seen: {:.1})", self.zone, self.phase, self.seen)
    }
}
