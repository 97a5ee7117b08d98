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

use uom::si::{f64::{Length,Velocity}, length::foot, velocity::{knot,foot_per_minute}};
use flyby_adsb::{phase::*, zone::Zone};

// run with "cargo test test_phase -- --nocapture"

#[test]
fn test_high_or_slow_is_cruising() {
    assert_eq!( phase_for( 35000.0, 450.0, 2000.0, Zone::NorthFlow), Phase::Cruising);
    assert_eq!( phase_for( 10000.0, 250.0, -2000.0, Zone::NorthFlow), Phase::Cruising);
    assert_eq!( phase_for( 5000.0, 100.0, 1500.0, Zone::NorthFlow), Phase::Cruising);
    assert_eq!( phase_for( 0.0, 150.0, 1500.0, Zone::SouthFlow), Phase::Cruising);
    assert_eq!( phase_for( -50.0, 150.0, 1500.0, Zone::SouthFlow), Phase::Cruising);
}

#[test]
fn test_climbing() {
    assert_eq!( phase_for( 5000.0, 150.0, 1500.0, Zone::NorthFlow), Phase::TakingOff);
    assert_eq!( phase_for( 5000.0, 150.0, 1500.0, Zone::SouthFlow), Phase::TakingOff);
    assert_eq!( phase_for( 5000.0, 150.0, 1500.0, Zone::Flyby), Phase::Ascending);
    assert_eq!( phase_for( 5000.0, 150.0, 1500.0, Zone::Hidden), Phase::Ascending);
}

#[test]
fn test_descending() {
    assert_eq!( phase_for( 4000.0, 150.0, -1500.0, Zone::NorthFlow), Phase::Landing);
    assert_eq!( phase_for( 4000.0, 150.0, -1500.0, Zone::SouthFlow), Phase::Landing);
    assert_eq!( phase_for( 4000.0, 150.0, -1500.0, Zone::Flyby), Phase::Descending);
    assert_eq!( phase_for( 4000.0, 150.0, -1500.0, Zone::Hidden), Phase::Descending);
}

#[test]
fn test_low_cruise() {
    assert_eq!( phase_for( 4000.0, 150.0, 0.0, Zone::NorthFlow), Phase::LowCruise);
    assert_eq!( phase_for( 4000.0, 150.0, 1000.0, Zone::Flyby), Phase::LowCruise); // thresholds are exclusive
    assert_eq!( phase_for( 4000.0, 150.0, -1000.0, Zone::SouthFlow), Phase::LowCruise);
}

#[test]
fn test_classify_with_units() {
    let alt = Some( Length::new::<foot>(5000.0));
    let spd = Some( Velocity::new::<knot>(150.0));

    assert_eq!( classify_phase( alt, spd, Some( Velocity::new::<foot_per_minute>(1500.0)), Zone::NorthFlow), Phase::TakingOff);
    assert_eq!( classify_phase( alt, spd, Some( Velocity::new::<foot_per_minute>(-1500.0)), Zone::Flyby), Phase::Descending);
    assert_eq!( classify_phase( alt, spd, None, Zone::NorthFlow), Phase::LowCruise);
    assert_eq!( classify_phase( None, spd, Some( Velocity::new::<foot_per_minute>(1500.0)), Zone::NorthFlow), Phase::Cruising);
    assert_eq!( classify_phase( alt, None, Some( Velocity::new::<foot_per_minute>(1500.0)), Zone::NorthFlow), Phase::Cruising);
}

#[test]
fn test_phase_labels() {
    let labels: Vec<&str> = [Phase::TakingOff, Phase::Landing, Phase::Ascending, Phase::Descending, Phase::LowCruise, Phase::Cruising]
        .iter().map( |p| p.as_str()).collect();
    assert_eq!( labels, vec!["taking off", "landing", "ascending", "descending", "low cruise", "cruising"]);
    assert_eq!( Phase::LowCruise.to_string(), "low cruise");
}

#[test]
fn test_classify_at_thresholds() {
    let ft = |v: f64| Some( Length::new::<foot>(v));
    let kt = |v: f64| Some( Velocity::new::<knot>(v));
    let fpm = |v: f64| Some( Velocity::new::<foot_per_minute>(v));

    // threshold values have to survive the conversion to and from SI units
    assert_eq!( classify_phase( ft(10000.0), kt(101.0), fpm(1001.0), Zone::NorthFlow), Phase::Cruising);
    assert_eq!( classify_phase( ft(10000.0), kt(101.0), fpm(-1001.0), Zone::NorthFlow), Phase::Cruising);
    assert_eq!( classify_phase( ft(10000.0), kt(101.0), fpm(1000.0), Zone::NorthFlow), Phase::Cruising);
    assert_eq!( classify_phase( ft(5000.0), kt(100.0), fpm(1500.0), Zone::NorthFlow), Phase::Cruising);

    assert_eq!( classify_phase( ft(9999.0), kt(101.0), fpm(1001.0), Zone::NorthFlow), Phase::TakingOff);
    assert_eq!( classify_phase( ft(5000.0), kt(150.0), fpm(1000.0), Zone::NorthFlow), Phase::LowCruise);
    assert_eq!( classify_phase( ft(5000.0), kt(150.0), fpm(-1000.0), Zone::SouthFlow), Phase::LowCruise);
    assert_eq!( classify_phase( ft(5000.0), kt(150.0), fpm(-1001.0), Zone::SouthFlow), Phase::Landing);

    assert_eq!( feed_units( Length::new::<foot>(10000.0).get::<foot>()), 10000.0);
}
