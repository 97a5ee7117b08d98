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

//! the flight aggregator. `FlightTracker` owns the table of tracked flights and is its single writer.
//! Readers can obtain a shared handle of the table that can be iterated concurrently

use std::{fmt, path::PathBuf, sync::Arc, time::Duration};
use dashmap::{DashMap, mapref::entry::Entry};
use tracing::{debug,warn};
use flyby_common::{datetime::EpochMillis, fs::expand_home, geo::GeoPoint};

use crate::{
    STALE_SECS, TrackedFlight,
    aircraft_type::{AircraftTypeLookup, AircraftTypeTable},
    config::FlybyConfig,
    errors::Result,
    feed::{AircraftObservation, dedup_by_hex},
    route::{CallsignRouteTable, FlightNumberTable, RouteLookup, RouteTables},
    zone::{Geofence, Zone},
};

/// what happened during a merge
#[derive(Debug,Default,Clone,Copy,PartialEq,Eq)]
pub struct MergeStats {
    pub added: usize,
    pub updated: usize,
    pub removed: usize,
    pub skipped: usize,
}

impl MergeStats {
    pub fn is_unchanged (&self)->bool { self.added == 0 && self.updated == 0 && self.removed == 0 }
}

impl fmt::Display for MergeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "added: {}, updated: {}, removed: {}, skipped: {}", self.added, self.updated, self.removed, self.skipped)
    }
}

pub struct FlightTracker<R,A> where R: RouteLookup, A: AircraftTypeLookup {
    geofence: Geofence,
    routes: R,
    types: A,
    stale_after: f64,
    flights: Arc<DashMap<String,TrackedFlight>>,
}

impl<R,A> FlightTracker<R,A> where R: RouteLookup, A: AircraftTypeLookup {
    pub fn new (geofence: Geofence, routes: R, types: A)->Self {
        FlightTracker {
            geofence,
            routes,
            types,
            stale_after: STALE_SECS,
            flights: Arc::new( DashMap::new()),
        }
    }

    pub fn with_stale_after (mut self, stale_after: f64)->Self {
        self.stale_after = stale_after;
        self
    }

    // the external accessors
    pub fn geofence (&self)->&Geofence { &self.geofence }
    pub fn stale_after (&self)->f64 { self.stale_after }
    pub fn flights (&self)->&DashMap<String,TrackedFlight> { self.flights.as_ref() }
    pub fn shared_flights (&self)->Arc<DashMap<String,TrackedFlight>> { self.flights.clone() }

    pub fn len (&self)->usize { self.flights.len() }
    pub fn is_empty (&self)->bool { self.flights.is_empty() }
    pub fn contains (&self, hex: &str)->bool { self.flights.contains_key( hex) }

    pub fn get (&self, hex: &str)->Option<TrackedFlight> {
        self.flights.get( hex).map( |e| e.value().clone())
    }

    /// copy of all tracked flights, ordered by hex code
    pub fn snapshot (&self)->Vec<TrackedFlight> {
        let mut list: Vec<TrackedFlight> = self.flights.iter().map( |e| e.value().clone()).collect();
        list.sort_by( |a,b| a.hex.cmp( &b.hex));
        list
    }

    pub fn merge (&mut self, snapshot: Vec<AircraftObservation>)->MergeStats {
        self.merge_at( snapshot, EpochMillis::now())
    }

    /// merge a feed snapshot into the tracked flights, using `now` as the update time:
    ///  - flights that are not tracked yet get added (and enriched) unless they are stale or have an invalid callsign
    ///  - tracked flights are removed if the observation is stale, otherwise the observed fields are overwritten
    ///    and zone/phase are re-computed
    ///  - tracked flights that are not in the snapshot are not touched
    pub fn merge_at (&mut self, snapshot: Vec<AircraftObservation>, now: EpochMillis)->MergeStats {
        let mut stats = MergeStats::default();
        let observations = dedup_by_hex( snapshot.into_iter().map( |obs| obs.normalize()).collect());

        for obs in observations {
            if obs.hex.is_empty() {
                stats.skipped += 1;
                continue
            }
            let is_stale = obs.is_stale( self.stale_after);

            match self.flights.entry( obs.hex.clone()) {
                Entry::Occupied(e) => {
                    if is_stale {
                        let (hex,flight) = e.remove_entry();
                        debug!("removing stale flight {} {:?} (seen {:.0}s)", hex, flight.callsign, obs.seen);
                        stats.removed += 1;
                    } else {
                        let mut flight = e.into_ref();
                        flight.update( &obs, now);
                        flight.reclassify( &self.geofence);
                        stats.updated += 1;
                    }
                }
                Entry::Vacant(e) => {
                    if is_stale || !obs.has_valid_callsign() {
                        stats.skipped += 1;
                    } else {
                        let flight = new_flight( &obs, &self.geofence, &self.routes, &self.types, now);
                        debug!("adding flight {} {:?} ({}, {})", flight.hex, flight.callsign, flight.zone, flight.phase);
                        e.insert( flight);
                        stats.added += 1;
                    }
                }
            }
        }

        stats
    }

    pub fn remove_absent (&mut self, drop_after: Duration)->usize {
        self.remove_absent_at( EpochMillis::now(), drop_after)
    }

    /// remove flights that were not updated for more than `drop_after`. This is not part of `merge` since
    /// absent flights are otherwise only removed once the feed reports them as stale
    pub fn remove_absent_at (&mut self, now: EpochMillis, drop_after: Duration)->usize {
        let dropped: Vec<String> = self.flights.iter()
            .filter( |e| e.value().last_update.elapsed_until(now) > drop_after)
            .map( |e| e.key().clone())
            .collect();

        for hex in &dropped {
            if let Some((hex,flight)) = self.flights.remove( hex) {
                debug!("dropping absent flight {} {:?}", hex, flight.callsign);
            }
        }
        dropped.len()
    }

    /// the flight a display should follow: the one in the north flow corridor, else in the south flow corridor,
    /// else in the flyby area, else any. Ties are resolved by the smallest hex code
    pub fn focus_flight (&self)->Option<TrackedFlight> {
        self.flights.iter()
            .min_by( |a,b| {
                zone_rank( a.value().zone).cmp( &zone_rank( b.value().zone))
                    .then_with( || a.key().cmp( b.key()))
            })
            .map( |e| e.value().clone())
    }

    /// the positioned flight with the smallest (planar) degree distance to `location`
    pub fn nearest_to (&self, location: &GeoPoint)->Option<TrackedFlight> {
        self.flights.iter()
            .filter_map( |e| {
                let d = e.value().position?.degree_distance( location);
                Some((d,e))
            })
            .min_by( |(da,a),(db,b)| da.total_cmp(db).then_with( || a.key().cmp( b.key())))
            .map( |(_,e)| e.value().clone())
    }
}

fn zone_rank (zone: Zone)->u8 {
    match zone {
        Zone::NorthFlow => 0,
        Zone::SouthFlow => 1,
        Zone::Flyby => 2,
        Zone::Hidden => 3,
    }
}

/// create a new flight including all enrichments. This is the only place where we do lookups
fn new_flight<R,A> (obs: &AircraftObservation, geofence: &Geofence, routes: &R, types: &A, now: EpochMillis)->TrackedFlight
    where R: RouteLookup, A: AircraftTypeLookup
{
    let mut flight = TrackedFlight::from_observation( obs, geofence, now);
    flight.route = routes.flight_number_route( &flight.callsign);
    flight.callsign_route = routes.callsign_route( &flight.callsign);
    flight.aircraft_type = types.aircraft_type( &flight.hex);
    flight
}

impl FlightTracker<RouteTables,Option<AircraftTypeTable>> {
    /// create a tracker from the configured geofence and lookup tables. Missing or unreadable resources are
    /// logged and turn into lookups without results
    pub fn from_config (config: &FlybyConfig)->Self {
        let geofence = Geofence::load( config.geofence.as_deref());
        let routes = RouteTables::new(
            load_table( &config.flight_numbers, |p| FlightNumberTable::from_path(p)),
            load_table( &config.callsign_routes, |p| CallsignRouteTable::from_path(p))
        );
        let types = load_table( &config.aircraft_types, |p| AircraftTypeTable::from_path(p));

        FlightTracker::new( geofence, routes, types).with_stale_after( config.stale_after)
    }
}

fn load_table<T,F> (path: &Option<String>, load: F)->Option<T> where F: FnOnce(PathBuf)->Result<T> {
    let path = path.as_ref()?;
    match load( expand_home( path)) {
        Ok(table) => Some(table),
        Err(e) => {
            warn!("failed to load lookup table {}: {}", path, e);
            None
        }
    }
}
