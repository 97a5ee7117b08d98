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

use std::fs;
use flyby_adsb::feed::*;

const DATA_JSON: &'static str = concat!( env!("CARGO_MANIFEST_DIR"), "/resources/data.json");

fn obs (hex: &str, callsign: Option<&str>, seen: f64)->AircraftObservation {
    AircraftObservation { hex: hex.to_string(), callsign: callsign.map( |cs| cs.to_string()), seen, ..Default::default() }
}

// run with "cargo test test_feed -- --nocapture"

#[test]
fn test_valid_callsign() {
    assert!( is_valid_callsign("UAL123"));
    assert!( is_valid_callsign("ua123"));
    assert!( is_valid_callsign("1234"));
    assert!( is_valid_callsign(" SWA1234  "));

    assert!( !is_valid_callsign(""));
    assert!( !is_valid_callsign("N123AB"));
    assert!( !is_valid_callsign("UAL"));
    assert!( !is_valid_callsign("ABCD123"));
}

#[test]
fn test_parse_data_json() {
    let data = fs::read( DATA_JSON).unwrap();
    let list = parse_observations( &data).unwrap();
    assert_eq!( list.len(), 4);

    let o = &list[0];
    assert_eq!( o.hex, "abc123");
    assert_eq!( o.callsign.as_deref(), Some("UAL123  "));
    assert_eq!( o.altitude, Some(5000));
    assert_eq!( o.vert_rate, Some(1500));
    assert_eq!( o.speed, Some(150.0));
    assert_eq!( o.seen, 5.0);
    assert!( o.position().is_some());

    assert_eq!( list[2].altitude, Some(0)); // "ground"
}

#[test]
fn test_lenient_values() {
    let list = parse_observations( br#"[
        {"hex":"A1", "flight":"UAL1", "altitude":"12000", "speed":"n/a", "vert_rate":-64.4},
        {"hex":"a2", "altitude":null}
    ]"#).unwrap();

    assert_eq!( list[0].altitude, Some(12000));
    assert_eq!( list[0].speed, None);
    assert_eq!( list[0].vert_rate, Some(-64));
    assert_eq!( list[0].lat, None);
    assert_eq!( list[0].seen, 0.0);

    assert_eq!( list[1].callsign, None);
    assert_eq!( list[1].altitude, None);

    assert!( parse_observations( b"{ not json").is_err());
}

#[test]
fn test_filters() {
    let data = fs::read( DATA_JSON).unwrap();

    let trackable = filter_trackable( parse_observations( &data).unwrap());
    let hexes: Vec<&str> = trackable.iter().map( |o| o.hex.as_str()).collect();
    assert_eq!( hexes, vec!["abc123", "a0ffee", "c0ffee"]); // stale c0ffee is retained
    assert_eq!( trackable[0].callsign.as_deref(), Some("UAL123"));

    let all = filter_all_planes( parse_observations( &data).unwrap(), 60.0);
    let hexes: Vec<&str> = all.iter().map( |o| o.hex.as_str()).collect();
    assert_eq!( hexes, vec!["abc123", "a0ffee"]);
}

#[test]
fn test_normalize() {
    let o = obs(" ABC123 ", Some("  "), 1.0).normalize();
    assert_eq!( o.hex, "abc123");
    assert_eq!( o.callsign, None);
}

#[test]
fn test_dedup() {
    let list = vec![
        obs("a1", Some("UAL1"), 1.0),
        obs("b2", Some("UAL2"), 2.0),
        obs("a1", Some("UAL1"), 3.0),
    ];
    let unique = dedup_by_hex( list);
    assert_eq!( unique.len(), 2);
    assert_eq!( unique[0].hex, "a1");
    assert_eq!( unique[0].seen, 3.0); // last one wins
    assert_eq!( unique[1].hex, "b2");
}

#[test]
fn test_feed_url() {
    let feed = Dump1090Feed::new( "192.168.1.10:8080/", std::time::Duration::from_secs(5)).unwrap();
    assert_eq!( feed.url(), "http://192.168.1.10:8080/dump1090/data.json");
}

#[test]
fn test_lenient_seen() {
    let list = parse_observations( br#"[
        {"hex":"a1", "flight":"UAL1", "seen":"75.5"},
        {"hex":"a2", "flight":"UAL2"},
        {"hex":"a3", "flight":"UAL3", "seen":"n/a"},
        {"hex":"a4", "flight":"UAL4", "seen":null},
        {"hex":"a5", "flight":"UAL5", "seen":12}
    ]"#).unwrap();

    assert_eq!( list[0].seen, 75.5);
    assert!( list[0].is_stale( 60.0));

    // records without valid seen are in the current snapshot, i.e. just received
    assert_eq!( list[1].seen, 0.0);
    assert_eq!( list[2].seen, 0.0);
    assert_eq!( list[3].seen, 0.0);
    assert_eq!( list[4].seen, 12.0);

    let all = filter_all_planes( list, 60.0);
    assert_eq!( all.len(), 4);
}
