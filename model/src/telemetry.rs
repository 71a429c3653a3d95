use anyhow::Result;
use log::{info, warn};
use serde::Deserialize;

use crate::{Fleet, Ping, VehicleName};

/// One line of the ping feed: `name,x,y,timestamp`. No header row.
#[derive(Deserialize)]
struct Record {
    name: VehicleName,
    x: f64,
    y: f64,
    timestamp: i64,
}

/// Reads a ping feed into the fleet. A record that doesn't parse is logged
/// and skipped, so one bad line never throws away the rest of the feed. An
/// I/O failure mid-read aborts with an error, keeping everything ingested
/// before it. Returns the number of pings ingested.
pub fn load<R: std::io::Read>(reader: R, fleet: &mut Fleet) -> Result<usize> {
    let mut ingested = 0;
    for rec in csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(reader)
        .deserialize()
    {
        let rec: Record = match rec {
            Ok(rec) => rec,
            Err(err) => {
                if err.is_io_error() {
                    return Err(err.into());
                }
                warn!("Skipping malformed ping record: {}", err);
                continue;
            }
        };
        fleet.ingest(rec.name, Ping::new(rec.x, rec.y, rec.timestamp));
        ingested += 1;
    }
    info!(
        "Ingested {} pings across {} vehicles",
        ingested,
        fleet.len()
    );
    Ok(ingested)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_headerless_records() {
        let feed = "Ada,0,0,0\nAda,1,1,2\nEuler,3.5,3.5,5\n";
        let mut fleet = Fleet::new();
        let ingested = load(feed.as_bytes(), &mut fleet).unwrap();

        assert_eq!(ingested, 3);
        assert_eq!(fleet.len(), 2);
        let ada = fleet.get(&VehicleName("Ada".to_string())).unwrap();
        assert!((ada.total_distance() - 1.414).abs() < 0.001);
    }

    #[test]
    fn malformed_records_are_skipped() {
        let feed = "Ada,0,0,0\nnot a ping\nEuler,oops,2,3\nAda,1,1,2\n";
        let mut fleet = Fleet::new();
        let ingested = load(feed.as_bytes(), &mut fleet).unwrap();

        assert_eq!(ingested, 2);
        assert_eq!(fleet.len(), 1);
        assert_eq!(
            fleet
                .get(&VehicleName("Ada".to_string()))
                .unwrap()
                .pings()
                .len(),
            2
        );
    }

    #[test]
    fn empty_feed_is_fine() {
        let mut fleet = Fleet::new();
        assert_eq!(load(&b""[..], &mut fleet).unwrap(), 0);
        assert!(fleet.is_empty());
    }
}
