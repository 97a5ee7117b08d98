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

//! slippy map (web mercator) tile coordinate math.
//! see https://wiki.openstreetmap.org/wiki/Slippy_map_tilenames

use std::f64::consts::PI;

pub const TILE_SIZE: f64 = 256.0;

/// fractional tile coordinates (x,y) of a lat/lon position at the given zoom level
pub fn deg2raw (lat_deg: f64, lon_deg: f64, zoom: u8)->(f64,f64) {
    let lat_rad = lat_deg.to_radians();
    let n = 2f64.powi( zoom as i32);
    let x = (lon_deg + 180.0) / 360.0 * n;
    let y = (1.0 - (lat_rad.tan() + 1.0/lat_rad.cos()).ln() / PI) / 2.0 * n;
    (x,y)
}

/// integer tile number that contains the given lat/lon position
pub fn deg2num (lat_deg: f64, lon_deg: f64, zoom: u8)->(i64,i64) {
    let (x,y) = deg2raw( lat_deg, lon_deg, zoom);
    (x.floor() as i64, y.floor() as i64)
}

/// lat/lon degrees of the north-west corner of a tile
pub fn num2deg (xtile: i64, ytile: i64, zoom: u8)->(f64,f64) {
    let n = 2f64.powi( zoom as i32);
    let lon_deg = xtile as f64 / n * 360.0 - 180.0;
    let lat_rad = (PI * (1.0 - 2.0 * ytile as f64 / n)).sinh().atan();
    (lat_rad.to_degrees(), lon_deg)
}

/// pixel distance from the position to the south-east (right/bottom) edge of its tile
pub fn tile_offset (lat_deg: f64, lon_deg: f64, zoom: u8)->(f64,f64) {
    let (x,y) = deg2raw( lat_deg, lon_deg, zoom);
    (TILE_SIZE - x.fract() * TILE_SIZE, TILE_SIZE - y.fract() * TILE_SIZE)
}

/// pixel offset of a position relative to a reference (e.g. centroid) position at the same zoom level
pub fn plane_offset (lat_deg: f64, lon_deg: f64, ref_lat_deg: f64, ref_lon_deg: f64, zoom: u8)->(f64,f64) {
    let (px,py) = deg2raw( lat_deg, lon_deg, zoom);
    let (cx,cy) = deg2raw( ref_lat_deg, ref_lon_deg, zoom);
    ((cx - px) * TILE_SIZE, (cy - py) * TILE_SIZE)
}
