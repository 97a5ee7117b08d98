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

//! the polling loop that periodically fetches feed snapshots and merges them into a `FlightTracker`

use std::time::Duration;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug,info,warn};

use crate::{
    aircraft_type::{AircraftTypeLookup, AircraftTypeTable},
    config::FlybyConfig,
    errors::{FlybyAdsbError, Result},
    feed::{Dump1090Feed, FeedSource},
    route::{RouteLookup, RouteTables},
    tracker::{FlightTracker, MergeStats},
};

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// owns the feed and the tracker it updates. Fetching and merging never overlap since both happen
/// sequentially in `poll_once`
pub struct FlightPoller<F,R,A> where F: FeedSource, R: RouteLookup, A: AircraftTypeLookup {
    feed: F,
    tracker: FlightTracker<R,A>,
    interval: Duration,
    fetch_timeout: Duration,
    drop_after: Option<Duration>,
}

impl<F,R,A> FlightPoller<F,R,A> where F: FeedSource, R: RouteLookup, A: AircraftTypeLookup {
    pub fn new (feed: F, tracker: FlightTracker<R,A>, interval: Duration)->Self {
        FlightPoller { feed, tracker, interval, fetch_timeout: DEFAULT_FETCH_TIMEOUT, drop_after: None }
    }

    pub fn with_fetch_timeout (mut self, fetch_timeout: Duration)->Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    /// also remove flights that were not updated within `drop_after` after each merge
    pub fn with_drop_after (mut self, drop_after: Option<Duration>)->Self {
        self.drop_after = drop_after;
        self
    }

    pub fn tracker (&self)->&FlightTracker<R,A> { &self.tracker }
    pub fn interval (&self)->Duration { self.interval }

    pub fn into_tracker (self)->FlightTracker<R,A> { self.tracker }

    /// fetch one snapshot and merge it. A failed or timed out fetch is an error and leaves the tracked flights unchanged
    pub async fn poll_once (&mut self)->Result<MergeStats> {
        let snapshot = match time::timeout( self.fetch_timeout, self.feed.fetch_snapshot()).await {
            Ok(res) => res?,
            Err(_) => return Err( FlybyAdsbError::TimeoutError( format!("no feed snapshot within {:?}", self.fetch_timeout)))
        };

        let mut stats = self.tracker.merge( snapshot);
        if let Some(drop_after) = self.drop_after {
            stats.removed += self.tracker.remove_absent( drop_after);
        }
        Ok(stats)
    }

    /// poll in fixed intervals until the cancel token is triggered, calling `on_update` after each successful merge.
    /// Cancellation also aborts a pending fetch. Returns the tracker so that callers can inspect the final state
    pub async fn run<C> (mut self, cancel: CancellationToken, mut on_update: C)->FlightTracker<R,A>
        where C: FnMut(&FlightTracker<R,A>, &MergeStats)
    {
        let mut ticker = time::interval( self.interval);
        ticker.set_missed_tick_behavior( MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let res = tokio::select! {
                _ = cancel.cancelled() => break,
                res = self.poll_once() => res
            };

            match res {
                Ok(stats) => {
                    debug!("merged feed snapshot ({}), tracking {} flights", stats, self.tracker.len());
                    on_update( &self.tracker, &stats);
                }
                Err(e) => warn!("skipping feed update: {}", e)
            }
        }

        info!("flight poller terminated");
        self.tracker
    }
}

impl FlightPoller<Dump1090Feed,RouteTables,Option<AircraftTypeTable>> {
    pub fn from_config (config: &FlybyConfig)->Result<Self> {
        let feed = Dump1090Feed::new( &config.host, config.fetch_timeout)?.with_stale_after( config.stale_after);
        let tracker = FlightTracker::from_config( config);

        Ok( FlightPoller::new( feed, tracker, config.update_interval)
            .with_fetch_timeout( config.fetch_timeout)
            .with_drop_after( config.drop_after) )
    }
}
