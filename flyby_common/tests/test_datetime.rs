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

use std::time::Duration;
use serde::{Serialize,Deserialize};
use flyby_common::datetime::{self, EpochMillis, millis, secs};

#[derive(Serialize,Deserialize,Debug,PartialEq)]
struct Timing {
    #[serde(serialize_with="datetime::ser_duration_as_fractional_secs", deserialize_with="datetime::de_duration_from_fractional_secs")]
    interval: Duration,

    #[serde(default, serialize_with="datetime::ser_optional_duration_as_fractional_secs", deserialize_with="datetime::de_optional_duration_from_fractional_secs")]
    timeout: Option<Duration>,
}

#[test]
fn test_fractional_secs() {
    let t: Timing = serde_json::from_str( r#"{ "interval": 1.5, "timeout": 30 }"#).unwrap();
    assert_eq!( t, Timing{ interval: millis(1500), timeout: Some( secs(30)) });
    assert_eq!( serde_json::to_string( &t).unwrap(), r#"{"interval":1.5,"timeout":30.0}"#);

    let t: Timing = serde_json::from_str( r#"{ "interval": 2 }"#).unwrap();
    assert_eq!( t.timeout, None);

    assert!( serde_json::from_str::<Timing>( r#"{ "interval": -2 }"#).is_err());
}

#[test]
fn test_epoch_millis() {
    let t0 = EpochMillis::from_secs( 1_700_000_000);
    let t1 = EpochMillis::new( t0.millis() + 2500);

    assert_eq!( t0.elapsed_until( t1), millis(2500));
    assert_eq!( t1.elapsed_until( t0), Duration::ZERO);
    assert_eq!( t0.to_string(), "2023-11-14T22:13:20.000Z");
}
