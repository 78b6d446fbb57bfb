use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use landbank_isochrone::{accessibility_score, IsochroneClient, ScoreSession, DEFAULT_CONTOUR_MINUTES};
use landbank_overpass::{BoundingBox, OverpassClient};
use landbank_store::prelude::*;

#[derive(Parser, Debug)]
#[command(
    name = "land-survey",
    author,
    version,
    about = "Survey vacant land parcels and score their public-transport access",
    long_about = "Queries the Overpass API for candidate vacant/brownfield land and \
                  railway stations inside a bounding box, lists the parcels with their \
                  spherical areas and nearest stations, and optionally scores one \
                  parcel's accessibility from a Mapbox travel-time isochrone."
)]
struct Args {
    /// Bounding box as south,west,north,east (defaults to central Glasgow)
    #[arg(long)]
    bbox: Option<String>,

    /// Filter the parcel list by description/owner substring
    #[arg(long)]
    search: Option<String>,

    /// Select this parcel id and score its accessibility
    #[arg(long)]
    select: Option<String>,

    /// Travel-time contour in minutes for the accessibility analysis
    #[arg(long, default_value_t = DEFAULT_CONTOUR_MINUTES)]
    minutes: u32,

    /// Mapbox access token (falls back to the MAPBOX_TOKEN environment variable)
    #[arg(long, env = "MAPBOX_TOKEN")]
    token: Option<String>,

    /// Overpass interpreter endpoint
    #[arg(long, default_value = landbank_overpass::DEFAULT_ENDPOINT)]
    endpoint: String,
}

fn parse_bbox(raw: &str) -> Result<BoundingBox> {
    let parts: Vec<f64> = raw
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .with_context(|| format!("invalid bounding box: {raw}"))?;

    let [south, west, north, east] = parts[..] else {
        bail!("bounding box needs exactly four values (south,west,north,east), got {raw}");
    };
    Ok(BoundingBox { south, west, north, east })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let bbox = match &args.bbox {
        Some(raw) => parse_bbox(raw)?,
        None => BoundingBox::GLASGOW,
    };
    info!(%bbox, "surveying bounding box");

    let overpass = OverpassClient::with_endpoint(&args.endpoint);
    let land = overpass
        .fetch_vacant_land(&bbox)
        .await
        .context("Overpass land query failed")?;
    let stations = overpass
        .fetch_railway_stations(&bbox)
        .await
        .context("Overpass station query failed")?;

    let mut store = FeatureStore::new();
    store.replace_parcels(land);
    store.replace_stations(stations);
    info!(
        parcels = store.parcels().len(),
        stations = store.stations().len(),
        "store populated"
    );

    let listed: Vec<&Parcel> = match &args.search {
        Some(query) => store.search(query),
        None => store.parcels().iter().collect(),
    };

    if listed.is_empty() {
        warn!("no parcels matched");
    }
    for parcel in &listed {
        let nearest = store
            .nearest_station(parcel.centroid)
            .map(|(station, dist)| format!("{} {:.0}m", station.label(), dist))
            .unwrap_or_else(|| "no station data".to_string());

        println!(
            "{:>12}  {:>10.0} m²  {:<24}  {}  [{}]",
            parcel.id.to_string(),
            parcel.area_m2,
            parcel.owner,
            parcel.description,
            nearest
        );
    }

    let Some(select) = &args.select else {
        return Ok(());
    };

    let selected = store
        .select(&select.as_str().into())
        .with_context(|| format!("cannot select parcel {select}"))?;
    println!("\nSelected {}: {}", selected.id, selected.description);

    let Some(token) = args.token else {
        bail!("a Mapbox token is required for accessibility scoring (--token or MAPBOX_TOKEN)");
    };

    let isochrone_client = IsochroneClient::new(token);
    let mut session = ScoreSession::new();
    let request = session.begin();

    match isochrone_client.fetch(selected.centroid, args.minutes).await {
        Ok(isochrone) => {
            session.complete(request, accessibility_score(&isochrone));
        }
        Err(err) => {
            // Scoring is best-effort; the store and selection stay as they are.
            warn!(error = %err, "isochrone fetch failed, skipping score");
        }
    }

    match session.score() {
        Some(score) => println!(
            "{}-minute public transport access score: {score}/100",
            args.minutes
        ),
        None => println!("No accessibility score available."),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bbox() {
        let bbox = parse_bbox("55.8, -4.4, 55.9, -4.1").unwrap();
        assert_eq!(bbox, BoundingBox::GLASGOW);

        assert!(parse_bbox("55.8,-4.4").is_err());
        assert!(parse_bbox("a,b,c,d").is_err());
    }
}
