use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::ping::TOLERANCE;
use crate::{Fleet, Ping, VehicleName};

/// A peak acceleration at or past this marks a vehicle as a damage risk.
/// Distance is unsigned, so the same bound catches hard braking too.
const MAX_SAFE_ACCELERATION: f64 = 10.0;

impl Fleet {
    /// Every vehicle's name mapped to its average speed. A vehicle whose
    /// average speed is undefined still appears, as `None`; nothing is
    /// filtered out.
    pub fn average_speeds(&self) -> BTreeMap<VehicleName, Option<f64>> {
        self.vehicles()
            .map(|vehicle| (vehicle.name.clone(), vehicle.average_speed()))
            .collect()
    }

    /// The names of the `max_results` vehicles that covered the most ground
    /// strictly after `timestamp`: distance descending, ties by name
    /// ascending. Asking for more vehicles than the fleet has returns them
    /// all. The ranking reads the stored pings but never changes them.
    pub fn most_traveled_since(&self, max_results: usize, timestamp: i64) -> Vec<VehicleName> {
        let mut ranked: Vec<(f64, &VehicleName)> = self
            .vehicles()
            .map(|vehicle| (vehicle.total_distance_since(timestamp), &vehicle.name))
            .collect();
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        ranked
            .into_iter()
            .take(max_results)
            .map(|(_, name)| name.clone())
            .collect()
    }

    /// Names of vehicles whose telemetry suggests damage: a peak
    /// acceleration at or past the safe bound, or a reading that coincides
    /// with another reading anywhere in the fleet (a vehicle can collide
    /// with itself only through duplicated readings). Aggressive movers are
    /// listed first, then collision candidates, each group in name order; a
    /// vehicle matching both signals appears once.
    pub fn check_for_damage(&self) -> Vec<VehicleName> {
        let collided = self.collision_candidates();

        let mut flagged = Vec::new();
        let mut seen = BTreeSet::new();
        for vehicle in self.vehicles() {
            if vehicle.max_acceleration() >= MAX_SAFE_ACCELERATION {
                seen.insert(vehicle.name.clone());
                flagged.push(vehicle.name.clone());
            }
        }
        for name in collided {
            if seen.insert(name.clone()) {
                flagged.push(name);
            }
        }
        flagged
    }

    // Coincident readings always land in the same or an adjacent coordinate
    // cell at the same timestamp, so bucket by cell and pairwise-test the
    // neighborhood. The tolerance relation isn't transitive, which rules out
    // using it directly as a grouping key.
    fn collision_candidates(&self) -> BTreeSet<VehicleName> {
        let mut cells: HashMap<(i64, i64, i64), Vec<(&VehicleName, &Ping)>> = HashMap::new();
        for vehicle in self.vehicles() {
            for ping in vehicle.pings() {
                cells
                    .entry(cell(ping))
                    .or_insert_with(Vec::new)
                    .push((&vehicle.name, ping));
            }
        }

        let mut candidates = BTreeSet::new();
        for (&(t, cx, cy), pings) in &cells {
            for (i, &(name, ping)) in pings.iter().enumerate() {
                for &(other_name, other) in &pings[i + 1..] {
                    if ping.coincides_with(other) {
                        candidates.insert(name.clone());
                        candidates.insert(other_name.clone());
                    }
                }
            }
            // Visit each unordered pair of adjacent cells once
            for (dx, dy) in [(0, 1), (1, -1), (1, 0), (1, 1)] {
                if let Some(others) = cells.get(&(t, cx + dx, cy + dy)) {
                    for &(name, ping) in pings {
                        for &(other_name, other) in others {
                            if ping.coincides_with(other) {
                                candidates.insert(name.clone());
                                candidates.insert(other_name.clone());
                            }
                        }
                    }
                }
            }
        }
        candidates
    }
}

fn cell(ping: &Ping) -> (i64, i64, i64) {
    (
        ping.timestamp,
        (ping.position.x / TOLERANCE).floor() as i64,
        (ping.position.y / TOLERANCE).floor() as i64,
    )
}
