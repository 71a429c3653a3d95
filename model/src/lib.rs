mod analytics;
mod ping;
mod telemetry;
mod vehicle;

use std::collections::BTreeMap;
use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub use self::ping::{Ping, Position};
pub use self::vehicle::Vehicle;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VehicleName(pub String);

impl fmt::Display for VehicleName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// All known vehicles, keyed by name. Vehicles are created lazily as their
/// first ping arrives and never removed.
#[derive(Default)]
pub struct Fleet {
    vehicles: BTreeMap<VehicleName, Vehicle>,
}

impl Fleet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a ping to the named vehicle, creating the vehicle if this is
    /// the first reading for that name.
    pub fn ingest(&mut self, name: VehicleName, ping: Ping) {
        self.vehicles
            .entry(name.clone())
            .or_insert_with(|| Vehicle::new(name))
            .add_ping(ping);
    }

    /// Reads a CSV ping feed into the fleet, skipping records that don't
    /// parse. Returns how many pings were ingested.
    pub fn load_pings<R: std::io::Read>(&mut self, reader: R) -> Result<usize> {
        telemetry::load(reader, self)
    }

    pub fn get(&self, name: &VehicleName) -> Option<&Vehicle> {
        self.vehicles.get(name)
    }

    /// Vehicles in ascending name order. This is the fleet order every query
    /// derives its output order from.
    pub fn vehicles(&self) -> impl Iterator<Item = &Vehicle> + '_ {
        self.vehicles.values()
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}
