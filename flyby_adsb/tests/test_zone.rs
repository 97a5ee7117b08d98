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

use std::{io::Write, sync::{Arc, atomic::{AtomicUsize, Ordering}}};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{Registry, layer::{Context, Layer, SubscriberExt}};
use flyby_common::geo::{GeoArea, GeoPoint};
use flyby_adsb::zone::*;

const GEOFENCE: &'static str = concat!( env!("CARGO_MANIFEST_DIR"), "/resources/flyby.geojson");

fn p (lon: f64, lat: f64)->GeoPoint { GeoPoint::from_lon_lat_degrees( lon, lat) }

fn rect (lon0: f64, lat0: f64, lon1: f64, lat1: f64)->GeoArea {
    GeoArea::from_lon_lat_ring( &[(lon0,lat0), (lon1,lat0), (lon1,lat1), (lon0,lat1), (lon0,lat0)])
}

/// counts the WARN events it sees
#[derive(Clone,Default)]
struct WarnCounter { count: Arc<AtomicUsize> }

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event (&self, event: &Event<'_>, _ctx: Context<'_,S>) {
        if *event.metadata().level() == Level::WARN {
            self.count.fetch_add( 1, Ordering::Relaxed);
        }
    }
}

fn count_warnings<F: FnOnce()> (f: F)->usize {
    let counter = WarnCounter::default();
    let subscriber = Registry::default().with( counter.clone());
    tracing::subscriber::with_default( subscriber, f);
    counter.count.load( Ordering::Relaxed)
}

// run with "cargo test test_zone -- --nocapture"

#[test]
fn test_classify_order() {
    // north and south overlap in [1,2], flyby contains both
    let areas = vec![ rect( 0.0, 0.0, 2.0, 2.0), rect( 1.0, 1.0, 3.0, 3.0), rect( -5.0, -5.0, 5.0, 5.0)];

    assert_eq!( classify_zone( &p( 0.5, 0.5), &areas), Zone::NorthFlow);
    assert_eq!( classify_zone( &p( 1.5, 1.5), &areas), Zone::NorthFlow); // north is tested first
    assert_eq!( classify_zone( &p( 2.5, 2.5), &areas), Zone::SouthFlow);
    assert_eq!( classify_zone( &p( -4.0, 4.0), &areas), Zone::Flyby);
    assert_eq!( classify_zone( &p( 10.0, 10.0), &areas), Zone::Hidden);
}

#[test]
fn test_classify_missing_areas() {
    let areas = vec![ rect( 0.0, 0.0, 2.0, 2.0)];
    assert_eq!( classify_zone( &p( 1.0, 1.0), &areas), Zone::NorthFlow);
    assert_eq!( classify_zone( &p( 4.0, 4.0), &areas), Zone::Hidden);
    assert_eq!( classify_zone( &p( 1.0, 1.0), &[]), Zone::Hidden);
}

#[test]
fn test_load_geofence() {
    let geofence = Geofence::load( Some(GEOFENCE));
    assert!( geofence.is_available());

    assert_eq!( geofence.classify( Some(&p( -121.89, 37.32))), Zone::NorthFlow);
    assert_eq!( geofence.classify( Some(&p( -121.95, 37.40))), Zone::SouthFlow);
    assert_eq!( geofence.classify( Some(&p( -122.10, 37.50))), Zone::Flyby);
    assert_eq!( geofence.classify( Some(&p( -121.00, 38.00))), Zone::Hidden);
    assert_eq!( geofence.classify( None), Zone::Hidden);
}

#[test]
fn test_missing_geofence_is_permissive() {
    let geofence = Geofence::load( Some("/no/such/dir/flyby.geojson"));
    assert!( !geofence.is_available());
    assert!( matches!( geofence, Geofence::Permissive));

    // everything matches the first area we check
    assert_eq!( geofence.classify( Some(&p( -121.00, 38.00))), Zone::NorthFlow);
    assert_eq!( geofence.classify( Some(&p( 10.0, 50.0))), Zone::NorthFlow);
    assert_eq!( geofence.classify( None), Zone::Hidden);

    assert!( matches!( Geofence::load( None), Geofence::Permissive));
}

#[test]
fn test_unusable_geofence() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!( file, r#"{{ "type": "FeatureCollection", "features": [
        {{ "type": "Feature", "properties": {{}},
           "geometry": {{ "type": "Polygon", "coordinates": [[[0.0,0.0],[1.0,0.0],[1.0,1.0],[0.0,1.0],[0.0,0.0]]] }} }}
    ]}}"#).unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let geofence = Geofence::load( Some(path.as_str()));
    assert!( matches!( geofence, Geofence::Unusable));
    assert_eq!( geofence.classify( Some(&p( 0.5, 0.5))), Zone::Hidden);

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!( file, "this is not json").unwrap();
    let path = file.path().to_str().unwrap().to_string();
    assert!( matches!( Geofence::load( Some(path.as_str())), Geofence::Unusable));
}

#[test]
fn test_zone_labels() {
    assert_eq!( Zone::NorthFlow.to_string(), "north_flow");
    assert_eq!( Zone::SouthFlow.as_str(), "south_flow");
    assert!( Zone::SouthFlow.is_landing_corridor());
    assert!( !Zone::Flyby.is_landing_corridor());
    assert!( !Zone::Hidden.is_landing_corridor());
}

#[test]
fn test_geofence_warns_once_per_load() {
    // the geofence is loaded once per run, classification never re-reads it (or warns again)
    let n = count_warnings( || {
        let geofence = Geofence::load( Some("/no/such/dir/flyby.geojson"));
        for i in 0..10 {
            assert_eq!( geofence.classify( Some(&p( -121.0 + i as f64, 38.0))), Zone::NorthFlow);
        }
    });
    assert_eq!( n, 1);

    let n = count_warnings( || {
        let geofence = Geofence::load( None);
        assert_eq!( geofence.classify( Some(&p( 0.0, 0.0))), Zone::NorthFlow);
    });
    assert_eq!( n, 0);

    let n = count_warnings( || {
        let geofence = Geofence::load( Some(GEOFENCE));
        assert_eq!( geofence.classify( Some(&p( -121.89, 37.32))), Zone::NorthFlow);
    });
    assert_eq!( n, 0);
}
