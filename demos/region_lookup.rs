//! Loads a region and resolves a few coordinates against it.
//!
//! Usage: `cargo run --example region_lookup -- [region] [data-dir]`
//! Without a data directory, files are fetched from the default dataset URL.

use laps::{Laps, LapsError, LatLng, Region};
use std::env;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<(), LapsError> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let region = args
        .next()
        .and_then(|slug| slug.parse::<Region>().ok())
        .unwrap_or(Region::Northern);
    let laps = match args.next() {
        Some(dir) => Laps::builder().data_dir(PathBuf::from(dir)).build(),
        None => Laps::builder().build(),
    };

    let mut session = laps.new_session();
    session.select_region(&laps, Some(region)).await;
    println!(
        "{} ({}): {} records",
        region.command(),
        region.subtitle(),
        session.dataset().len()
    );

    let (center_lat, center_lng) = region.bounds().center();
    for LatLng(lat, lng) in [LatLng(center_lat, center_lng), LatLng(32.24, 77.19), LatLng(27.33, 88.61)] {
        let marker = session.click(lat, lng);
        match &marker.nearest {
            Some(record) => println!(
                "({lat:.3}, {lng:.3}) -> {} [{:.1} km] landslide {}, avalanche {}",
                record.location,
                record.distance.unwrap_or_default(),
                record.landslide_risk,
                record.avalanche_risk
            ),
            None => println!("({lat:.3}, {lng:.3}) -> no data loaded"),
        }
    }

    let boundaries = laps.boundaries().load_all(true).await;
    println!(
        "Boundaries: {} country, {} state, {} district features",
        boundaries.country.len(),
        boundaries.states.len(),
        boundaries.districts.len()
    );
    Ok(())
}
