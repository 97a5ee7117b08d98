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

//! this module provides the geodetic types we need for geofencing. As a general principle
//! we build on [geo](https://docs.rs/geo/latest/geo/index.html) and [geojson](https://docs.rs/geojson/latest/geojson/)
//! and only add value semantics (longitude/latitude degrees) via the new type pattern, which keeps
//! the algorithms of the 3rd party crates available with minimal copying overhead.

use std::fmt;
use std::path::Path;
use serde::{Serialize,Deserialize};
use geo::{Contains, Coord, MultiPolygon, Point, Polygon};
use geojson::GeoJson;

use crate::errors::{FlybyCommonError, Result};
use crate::fs::filepath_contents_as_string;

pub type GeoCoord = Coord<f64>;

#[inline]
pub fn normalize_180 (deg: f64)->f64 {
    if (-180.0..=180.0).contains(&deg) { deg } else { (deg + 180.0).rem_euclid(360.0) - 180.0 }
}

#[inline]
pub fn normalize_90 (deg: f64)->f64 { deg.clamp( -90.0, 90.0) }

/* #region GeoPoint ***********************************************************************************************/

/// a wrapper for geo::Point that uses geodetic degrees stored as f64 (x = longitude, y = latitude)
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct GeoPoint(Point);

impl GeoPoint {
    pub fn from_lon_lat_degrees (lon: f64, lat: f64) -> Self {
        GeoPoint( Point::new( normalize_180(lon), normalize_90(lat)))
    }

    pub fn longitude_degrees (&self)->f64 { self.0.x() }
    pub fn latitude_degrees (&self)->f64 { self.0.y() }

    pub fn point<'a> (&'a self) -> &'a Point { &self.0 }

    pub fn coord (&self)->GeoCoord { self.0.0 }

    /// planar distance in degrees. This is only meaningful to rank points that are close to each other
    pub fn degree_distance (&self, other: &GeoPoint)->f64 {
        let dx = self.0.x() - other.0.x();
        let dy = self.0.y() - other.0.y();
        (dx*dx + dy*dy).sqrt()
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.0.x(),self.0.y())
    }
}

/// serializable latitude/longitude pair as it is used in configs: `(lat: 37.36, lon: -121.92)`
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct LatLon {
    #[serde(alias="latitude")]
    pub lat: f64,
    #[serde(alias="longitude")]
    pub lon: f64,
}

impl LatLon {
    pub fn new (lat: f64, lon: f64)->Self { LatLon{lat,lon} }

    pub fn to_geo_point (&self)->GeoPoint { GeoPoint::from_lon_lat_degrees( self.lon, self.lat) }
}

/* #endregion GeoPoint */

/* #region GeoArea ************************************************************************************************/

/// a (multi) polygon area in geodetic degrees. Single polygons are stored as one-element multi polygons
#[derive(Debug,Clone)]
pub struct GeoArea(MultiPolygon);

impl GeoArea {
    pub fn from_polygon (polygon: Polygon)->Self { GeoArea( MultiPolygon::new( vec![polygon])) }

    pub fn from_multi_polygon (mp: MultiPolygon)->Self { GeoArea(mp) }

    /// create area from a single closed ring of lon/lat degree tuples
    pub fn from_lon_lat_ring (ring: &[(f64,f64)])->Self {
        let coords: Vec<GeoCoord> = ring.iter().map( |(lon,lat)| Coord{ x: *lon, y: *lat }).collect();
        GeoArea::from_polygon( Polygon::new( coords.into(), Vec::new()))
    }

    pub fn multi_polygon<'a> (&'a self)->&'a MultiPolygon { &self.0 }

    pub fn polygon_count (&self)->usize { self.0.0.len() }

    /// note that points on the boundary are not contained
    pub fn contains (&self, p: &GeoPoint)->bool { self.0.contains( &p.0) }
}

impl TryFrom<geo::Geometry> for GeoArea {
    type Error = FlybyCommonError;

    fn try_from (geom: geo::Geometry)->Result<Self> {
        match geom {
            geo::Geometry::Polygon(p) => Ok( GeoArea::from_polygon(p)),
            geo::Geometry::MultiPolygon(mp) => Ok( GeoArea(mp)),
            other => Err( FlybyCommonError::GeometryError( format!("not an area: {other:?}")))
        }
    }
}

/// parse a GeoJSON FeatureCollection into the areas of its features, preserving feature order.
/// Features without geometry or with non-area geometries are errors since they would shift
/// the positional semantics of the collection
pub fn parse_geojson_areas (s: &str)->Result<Vec<GeoArea>> {
    let gj: GeoJson = s.parse()?;

    match gj {
        GeoJson::FeatureCollection(fc) => {
            let mut areas = Vec::with_capacity( fc.features.len());
            for (i,feature) in fc.features.into_iter().enumerate() {
                let geometry = feature.geometry.ok_or_else( || FlybyCommonError::GeometryError( format!("feature {i} has no geometry")))?;
                let geom: geo::Geometry<f64> = geometry.try_into()?;
                areas.push( GeoArea::try_from(geom)?);
            }
            Ok(areas)
        }
        _ => Err( FlybyCommonError::GeometryError( "not a FeatureCollection".to_string()))
    }
}

pub fn read_geojson_areas (path: impl AsRef<Path>)->Result<Vec<GeoArea>> {
    let s = filepath_contents_as_string( &path.as_ref())?;
    parse_geojson_areas( &s)
}

/* #endregion GeoArea */
