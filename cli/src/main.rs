use anyhow::Result;
use chrono::{LocalResult, TimeZone, Utc};
use structopt::StructOpt;

use model::{Fleet, VehicleName};

#[derive(StructOpt)]
#[structopt(name = "warehouse", about = "Print fleet analytics for a ping feed")]
struct Args {
    /// The path to a ping feed CSV file, one `name,x,y,timestamp` reading
    /// per line
    pings: String,
    /// How many vehicles to list in the travel ranking
    #[structopt(long, default_value = "3")]
    top: usize,
    /// Only count travel strictly after this timestamp (seconds since the
    /// epoch)
    #[structopt(long, default_value = "1553273158")]
    since: i64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::from_args();

    let mut fleet = Fleet::new();
    fleet.load_pings(fs_err::File::open(&args.pings)?)?;
    println!("~~~ Warehouse fleet is initialized");
    println!();

    let speeds = fleet
        .average_speeds()
        .into_iter()
        .map(|(name, speed)| match speed {
            Some(speed) => format!("{}={}", name, speed),
            None => format!("{}=?", name),
        })
        .collect::<Vec<_>>()
        .join(", ");
    println!("Average speeds: {}", speeds);
    println!();

    print_names(
        &format!(
            "The {} most traveled vehicles since {} are:",
            args.top,
            describe_timestamp(args.since)
        ),
        fleet.most_traveled_since(args.top, args.since),
    );

    print_names("Vehicles possibly damaged:", fleet.check_for_damage());

    Ok(())
}

fn describe_timestamp(timestamp: i64) -> String {
    match Utc.timestamp_opt(timestamp, 0) {
        LocalResult::Single(datetime) => format!("{} ({})", timestamp, datetime),
        _ => timestamp.to_string(),
    }
}

fn print_names(description: &str, names: Vec<VehicleName>) {
    println!("{}", description);
    for name in names {
        println!("\t{}", name);
    }
    println!();
}
