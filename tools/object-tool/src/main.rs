//! object-tool: landscape object file export/import and OSM conversion.
//!
//! Usage:
//!   object-tool export --name Alps --json-file alps.json
//!   object-tool import --name Alps --json-file trees.json --json-file power.json
//!   object-tool view --name Alps --exclude pine
//!   object-tool osm-query --kind power --bbox 50.1,11.6,54.8,15.25 > power.overpassql
//!   object-tool osm-convert --power power_osm.json --wind wind_osm.json --output osm.json

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use landscape_core::{LandscapeConfig, Result};
use landscape_objects::document::write_document;
use landscape_objects::osm::{convert_features, load_overpass, overpass_query};
use landscape_objects::pipeline::{self, InterchangeOptions, Landscape};
use landscape_objects::{BoundingBox, FeatureKind, UtmProjection};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "object-tool", version, about = "Landscape object file interchange")]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Simulator base directory, overrides the configuration
    #[arg(long, global = true)]
    condor_dir: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Keep objects whose name contains this (repeatable)
    #[arg(long)]
    include: Vec<String>,

    /// Drop objects whose name contains this (repeatable, wins over --include)
    #[arg(long)]
    exclude: Vec<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode the landscape's object file into a JSON document
    Export {
        /// Landscape name
        #[arg(long)]
        name: String,
        #[command(flatten)]
        filter: FilterArgs,
        /// Keep objects outside the landscape bounds
        #[arg(long)]
        noclip: bool,
        /// Output document
        #[arg(long)]
        json_file: Option<PathBuf>,
    },
    /// Replace the landscape's object file with JSON documents
    Import {
        #[arg(long)]
        name: String,
        #[arg(long)]
        noclip: bool,
        /// Input document (repeatable, concatenated in order)
        #[arg(long, required = true)]
        json_file: Vec<PathBuf>,
    },
    /// Print object counts per template
    View {
        #[arg(long)]
        name: String,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Print the Overpass query for a feature kind
    OsmQuery {
        /// wind | power
        #[arg(long)]
        kind: FeatureKind,
        /// south,west,north,east in degrees
        #[arg(long)]
        bbox: BoundingBox,
    },
    /// Convert Overpass JSON responses into a JSON document
    OsmConvert {
        /// Overpass response with wind generators
        #[arg(long)]
        wind: Option<PathBuf>,
        /// Overpass response with power towers
        #[arg(long)]
        power: Option<PathBuf>,
        /// Output document
        #[arg(long)]
        output: PathBuf,
        /// UTM zone, overrides the configuration
        #[arg(long)]
        utm_zone: Option<u8>,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(cli) {
        error!("{e}");
        process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<LandscapeConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            info!("Using configuration {}", path.display());
            LandscapeConfig::load(path)?
        }
        None => LandscapeConfig::default(),
    };
    if let Some(dir) = &cli.condor_dir {
        config.condor_dir = dir.clone();
    }
    Ok(config)
}

fn interchange_options(filter: &FilterArgs, noclip: bool) -> InterchangeOptions {
    if !filter.include.is_empty() {
        info!("Including objects with name containing {:?}", filter.include);
    }
    if !filter.exclude.is_empty() {
        info!("Excluding objects with name containing {:?}", filter.exclude);
    }
    InterchangeOptions {
        include: filter.include.clone(),
        exclude: filter.exclude.clone(),
        no_clip: noclip,
        multi_source: true,
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    match &cli.command {
        Command::Export {
            name,
            filter,
            noclip,
            json_file,
        } => {
            let landscape = Landscape::open(&config, name)?;
            let options = interchange_options(filter, *noclip);
            match json_file {
                Some(path) => {
                    pipeline::export_to(&landscape, &options, path)?;
                }
                None => {
                    let objects = pipeline::export(&landscape, &options)?;
                    info!("{} objects, no --json-file given", objects.len());
                }
            }
        }
        Command::Import {
            name,
            noclip,
            json_file,
        } => {
            let landscape = Landscape::open(&config, name)?;
            let options = interchange_options(&FilterArgs::default(), *noclip);
            pipeline::import(&landscape, json_file.as_slice(), &options)?;
        }
        Command::View { name, filter } => {
            let landscape = Landscape::open(&config, name)?;
            let report = pipeline::view(&landscape, &interchange_options(filter, false))?;
            print!("{report}");
        }
        Command::OsmQuery { kind, bbox } => {
            print!("{}", overpass_query(*kind, bbox));
        }
        Command::OsmConvert {
            wind,
            power,
            output,
            utm_zone,
        } => {
            let zone = utm_zone.unwrap_or(config.utm_zone);
            let projection = UtmProjection::new(zone)?;
            let mut objects = Vec::new();
            for (kind, path) in [
                (FeatureKind::WindGenerator, wind),
                (FeatureKind::PowerTower, power),
            ] {
                if let Some(path) = path {
                    let features = load_overpass(path)?;
                    objects.extend(convert_features(&features, kind, &projection, &config)?);
                }
            }
            write_document(output, &objects)?;
        }
    }
    Ok(())
}
