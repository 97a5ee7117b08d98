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

use tokio_util::sync::CancellationToken;
use tracing::{info,warn};
use tracing_subscriber::EnvFilter;
use anyhow::Result;
use flyby_common::{define_cli, check_cli, config::load_config, tiles::plane_offset};
use flyby_adsb::{config::FlybyConfig, filter::AltitudeFilter, poller::FlightPoller};

define_cli! { ARGS [about="console monitor for flights tracked from a dump1090 ADS-B feed"] =
    config: String [help="filename or path of RON config", long, default_value="flyby.ron"],
    host: Option<String> [help="dump1090 host:port (overrides config)", long],
    altitude: Option<String> [help="altitude filter such as '<10000' or '>30000' (overrides config)", long],
    zoom: u8 [help="map zoom level for focus flight pixel offsets", long, default_value="12"]
}

#[tokio::main]
async fn main()->Result<()> {
    check_cli!(ARGS);

    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::from_default_env())  // use RUST_LOG to set max level
        .init();

    let mut config: FlybyConfig = match load_config( &ARGS.config) {
        Ok(config) => config,
        Err(e) => {
            warn!("no usable config {}: {}, using defaults", ARGS.config, e);
            FlybyConfig::default()
        }
    };
    if let Some(host) = &ARGS.host { config.host = host.clone() }
    if let Some(altitude) = &ARGS.altitude { config.altitude_filter = Some(altitude.clone()) }

    let filter = AltitudeFilter::from_config( &config.altitude_filter)?;
    let location = config.location.to_geo_point();
    let poller = FlightPoller::from_config( &config)?;
    info!("monitoring http://{}/dump1090/data.json every {:?}", config.host, config.update_interval);

    let cancel = CancellationToken::new();
    let ctrl_c_token = cancel.clone();
    tokio::spawn( async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_token.cancel();
        }
    });

    poller.run( cancel, |tracker, stats| {
        println!("------------------ {} flights ({})", tracker.len(), stats);
        for flight in tracker.snapshot() {
            if filter.map( |f| f.matches( &flight)).unwrap_or(true) {
                println!("{}", flight);
            }
        }
        if let Some(flight) = tracker.focus_flight() {
            println!("focus:   {}", flight);
            if let Some(pos) = &flight.position {
                let (dx,dy) = plane_offset( pos.latitude_degrees(), pos.longitude_degrees(), location.latitude_degrees(), location.longitude_degrees(), ARGS.zoom);
                println!("         offset from observer at zoom {}: ({:.0},{:.0}) px", ARGS.zoom, dx, dy);
            }
        }
        if let Some(flight) = tracker.nearest_to( &location) {
            println!("nearest: {}", flight);
        }
    }).await;

    Ok(())
}
