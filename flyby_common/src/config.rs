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

//! RON config lookup. A config file is located (in this order) as
//!   1. the given filename if it refers to an existing file
//!   2. `$FLYBY_CONFIGS/<filename>`
//!   3. `./configs/<filename>`
//!   4. `$HOME/.flyby/configs/<filename>`

use std::{env, path::{Path,PathBuf}};
use serde::Deserialize;
use tracing::debug;

use crate::errors::{FlybyCommonError,Result};
use crate::fs::{existing_file, expand_home, filepath_contents};

pub const CONFIGS: &'static str = "configs";
pub const CONFIGS_ENV: &'static str = "FLYBY_CONFIGS";

pub fn find_config_file (filename: &str)->Option<PathBuf> {
    let path = expand_home( filename);
    if let Some(p) = existing_file( &path) { return Some(p) }

    if let Ok(dir) = env::var( CONFIGS_ENV) {
        if let Some(p) = existing_file( expand_home(&dir).join(filename)) { return Some(p) }
    }

    if let Some(p) = existing_file( Path::new(CONFIGS).join(filename)) { return Some(p) }

    if let Some(home) = env::var_os("HOME") {
        let mut pb = PathBuf::from(home);
        pb.push(".flyby");
        pb.push(CONFIGS);
        pb.push(filename);
        if let Some(p) = existing_file( pb) { return Some(p) }
    }

    None
}

/// load config using the file lookup order defined in this module
pub fn load_config<C> (filename: &str) -> Result<C> where C: for <'a> Deserialize<'a> {
    if let Some(path) = find_config_file( filename) {
        debug!("loading config {:?}", path);
        let data = filepath_contents( &path)?;
        return Ok( ron::de::from_bytes( data.as_slice())? )
    }

    Err( FlybyCommonError::ResourceNotFoundError(filename.to_string()) )
}

/// parse config from a RON string (mostly useful for tests and inlined defaults)
pub fn config_from_str<C> (s: &str) -> Result<C> where C: for <'a> Deserialize<'a> {
    Ok( ron::from_str(s)? )
}
