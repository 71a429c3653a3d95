use log::warn;
use serde::{Deserialize, Serialize};

use crate::{Ping, Position, VehicleName};

/// A named vehicle and its pings, earliest first. All of the kinematics are
/// derived from the ping sequence on demand; nothing is cached.
#[derive(Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub name: VehicleName,
    pings: Vec<Ping>,
}

impl Vehicle {
    pub fn new(name: VehicleName) -> Self {
        Self {
            name,
            pings: Vec::new(),
        }
    }

    /// Appends a reading. The sequence is trusted to arrive in chronological
    /// order; a late ping is kept where it lands, but logged, since "first"
    /// and "last" below assume insertion order is time order.
    pub fn add_ping(&mut self, ping: Ping) {
        if let Some(last) = self.pings.last() {
            if ping.timestamp < last.timestamp {
                warn!(
                    "{}: ping {} arrived out of order (last reading was at {})",
                    self.name, ping, last.timestamp
                );
            }
        }
        self.pings.push(ping);
    }

    pub fn pings(&self) -> &[Ping] {
        &self.pings
    }

    /// Total distance traveled across the whole ping sequence. Zero until
    /// there are at least two pings.
    pub fn total_distance(&self) -> f64 {
        distance_along(&self.pings)
    }

    /// Distance traveled among the pings strictly after `timestamp`. Only
    /// legs between two surviving pings count; the leg from the last reading
    /// at or before the cutoff to the first one after it does not.
    pub fn total_distance_since(&self, timestamp: i64) -> f64 {
        let surviving: Vec<Ping> = self
            .pings
            .iter()
            .filter(|ping| ping.timestamp > timestamp)
            .copied()
            .collect();
        distance_along(&surviving)
    }

    /// Total distance over the seconds between the first and last ping.
    /// Undefined (`None`) with fewer than two pings, or when the first and
    /// last reading share a timestamp.
    pub fn average_speed(&self) -> Option<f64> {
        if self.pings.len() < 2 {
            return None;
        }
        let elapsed = Ping::seconds_between(&self.pings[0], self.pings.last().unwrap());
        if elapsed == 0 {
            return None;
        }
        Some(self.total_distance() / elapsed as f64)
    }

    /// The peak per-leg acceleration, modeling each leg as a standing start:
    /// a = 2d / dt^2. Zero with fewer than two pings. A zero-duration leg
    /// with displacement comes out as +infinity and wins the max; a
    /// duplicated reading (zero duration, zero displacement) produces NaN,
    /// which the fold drops.
    pub fn max_acceleration(&self) -> f64 {
        self.pings
            .windows(2)
            .map(|pair| {
                let d = Position::distance(pair[0].position, pair[1].position);
                let dt = Ping::seconds_between(&pair[0], &pair[1]) as f64;
                2.0 * d / (dt * dt)
            })
            .fold(0.0, f64::max)
    }
}

fn distance_along(pings: &[Ping]) -> f64 {
    pings
        .windows(2)
        .map(|pair| Position::distance(pair[0].position, pair[1].position))
        .sum()
}
