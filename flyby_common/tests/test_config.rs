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

use std::io::Write;
use std::time::Duration;
use serde::Deserialize;
use flyby_common::{config::{config_from_str, load_config}, FlybyCommonError};

#[derive(Deserialize,Debug)]
struct TestConfig {
    host: String,
    interval: Duration,
    limit: Option<u32>,
}

#[test]
fn test_load_config_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!( file, r#"TestConfig( host: "localhost:8080", interval: (secs: 5, nanos: 0), limit: Some(3) )"#).unwrap();

    let path = file.path().to_str().unwrap().to_string();
    let config: TestConfig = load_config( &path).unwrap();
    assert_eq!( config.host, "localhost:8080");
    assert_eq!( config.interval, Duration::from_secs(5));
    assert_eq!( config.limit, Some(3));
}

#[test]
fn test_config_not_found() {
    match load_config::<TestConfig>( "no_such_config_file.ron") {
        Err(FlybyCommonError::ResourceNotFoundError(f)) => assert_eq!( f, "no_such_config_file.ron"),
        other => panic!("unexpected result {other:?}")
    }
}

#[test]
fn test_malformed_config() {
    assert!( config_from_str::<TestConfig>( "TestConfig( host: 42 )").is_err());
}
