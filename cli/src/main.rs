//! Routing queries against street and property snapshots stored as JSON files.

#[macro_use]
extern crate log;

mod repository;

use anyhow::{bail, Context, Result};
use geojson::GeoJson;
use structopt::StructOpt;

use geom::{Distance, LonLat};
use route_graph::{PropertyID, Router, RouterConfig};

use crate::repository::{JsonProperties, JsonStreets};

#[derive(StructOpt)]
#[structopt(name = "route-graph", about = "Routes between points along hand-drawn streets")]
enum Command {
    /// Finds the shortest path between two coordinates, printed as JSON
    Path {
        #[structopt(flatten)]
        input: Input,
        /// The origin, as "longitude,latitude"
        #[structopt(long, parse(try_from_str = parse_lon_lat))]
        from: LonLat,
        /// The destination, as "longitude,latitude"
        #[structopt(long, parse(try_from_str = parse_lon_lat))]
        to: LonLat,
    },
    /// Finds the shortest path between two properties, printed as JSON
    PropertyPath {
        #[structopt(flatten)]
        input: Input,
        /// The property ID to start from
        #[structopt(long)]
        from: usize,
        /// The property ID to end at
        #[structopt(long)]
        to: usize,
    },
    /// Prints every node and edge of the routing graph as JSON
    Inspect {
        #[structopt(flatten)]
        input: Input,
    },
    /// Writes the routing graph as GeoJSON, for viewing on a map
    #[structopt(name = "export-geojson")]
    ExportGeoJSON {
        #[structopt(flatten)]
        input: Input,
        /// The GeoJSON file to write
        #[structopt(long, default_value = "routing_graph.geojson")]
        output: String,
    },
}

#[derive(StructOpt)]
struct Input {
    /// The path to a JSON list of streets
    #[structopt(long)]
    streets: String,
    /// The path to a JSON list of properties. Only needed for property-path.
    #[structopt(long)]
    properties: Option<String>,
    /// The path to a JSON file with router settings. Missing fields use defaults.
    #[structopt(long)]
    config: Option<String>,
    /// Overrides the config. Nodes closer than this to an unconnected edge get snapped onto it.
    #[structopt(long)]
    snap_threshold_meters: Option<f64>,
    /// Overrides the config
    #[structopt(long)]
    cache_ttl_seconds: Option<f64>,
}

impl Input {
    fn load_config(&self) -> Result<RouterConfig> {
        let mut config = match self.config {
            Some(ref path) => {
                let contents = fs_err::read_to_string(path)?;
                serde_json::from_str(&contents)
                    .with_context(|| format!("couldn't parse config from {}", path))?
            }
            None => RouterConfig::default(),
        };
        if let Some(meters) = self.snap_threshold_meters {
            if !meters.is_finite() || meters < 0.0 {
                bail!("--snap-threshold-meters must be a non-negative number, not {}", meters);
            }
            config.graph.snap_threshold = Distance::meters(meters);
        }
        if let Some(seconds) = self.cache_ttl_seconds {
            config.cache_ttl_seconds = seconds;
        }
        Ok(config)
    }

    fn router(&self) -> Result<Router<JsonStreets, JsonProperties>> {
        let config = self.load_config()?;
        let properties = match self.properties {
            Some(ref path) => JsonProperties::load(path)?,
            None => JsonProperties::default(),
        };
        let num_properties = properties.len();
        let router = Router::new(JsonStreets::new(self.streets.clone()), properties, config);
        info!(
            "Routing over {} with {} properties, snapping within {}",
            self.streets,
            num_properties,
            router.config().graph.snap_threshold
        );
        Ok(router)
    }
}

fn main() -> Result<()> {
    abstutil::logger::setup();

    match Command::from_args() {
        Command::Path { input, from, to } => {
            let result = input.router()?.find_path(from, to)?;
            if !result.found {
                warn!("No route from {} to {}", from, to);
            }
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::PropertyPath { input, from, to } => {
            if input.properties.is_none() {
                bail!("property-path needs --properties");
            }
            let result = input
                .router()?
                .find_path_between_properties(PropertyID(from), PropertyID(to))?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Inspect { input } => {
            let snapshot = input.router()?.inspect_graph()?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Command::ExportGeoJSON { input, output } => {
            let snapshot = input.router()?.inspect_graph()?;
            let geojson = GeoJson::from(snapshot.to_geojson());
            fs_err::write(&output, geojson.to_string())?;
            println!("Wrote {}", output);
        }
    }
    Ok(())
}

fn parse_lon_lat(input: &str) -> Result<LonLat> {
    let parts: Vec<&str> = input.split(',').collect();
    if parts.len() != 2 {
        bail!("expected \"longitude,latitude\", got {}", input);
    }
    let lon: f64 = parts[0].trim().parse()?;
    let lat: f64 = parts[1].trim().parse()?;
    let pt = LonLat::new(lon, lat);
    if !pt.is_valid() {
        bail!("{} isn't a valid coordinate", input);
    }
    Ok(pt)
}
