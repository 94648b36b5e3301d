use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use track_o_mat::export::{file_name, ExportFormat, Exporter};
use track_o_mat::store::TrackDocument;
use track_o_mat::track::{self, WallClock};
use track_o_mat::web::{self, Config};

#[derive(Parser)]
#[command(name = "track-o-mat")]
#[command(about = "Track statistics and GPX/KML/CSV/GeoJSON export")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a track file
    Validate { track: String },
    /// Print summary statistics for a track file
    Summary { track: String },
    /// Export a track file
    Export {
        track: String,
        /// gpx, kml, csv or geojson
        #[arg(short, long)]
        format: String,
        /// Output file or directory; stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// UTC offset the capture times were recorded in, e.g. +08:00
        #[arg(long)]
        utc_offset: Option<String>,
    },
    /// Serve the HTTP API
    Serve {
        #[arg(short, long, default_value = "config.yaml")]
        config: String,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { track } => validate(&track),
        Commands::Summary { track } => summary(&track),
        Commands::Export {
            track,
            format,
            output,
            utc_offset,
        } => export(&track, &format, output.as_deref(), utc_offset.as_deref()),
        Commands::Serve { config } => serve(&config),
    }
}

fn load(path: &str) -> Option<TrackDocument> {
    match TrackDocument::from_file(Path::new(path)) {
        Ok(document) => Some(document),
        Err(e) => {
            eprintln!("Error loading track {}: {}", path, e);
            None
        }
    }
}

fn validate(path: &str) -> ExitCode {
    let Some(document) = load(path) else {
        return ExitCode::FAILURE;
    };

    let located = document
        .points
        .iter()
        .filter(|p| p.position().is_some())
        .count();
    println!(
        "Track '{}' is valid ({} points, {} with coordinates)",
        document.metadata.display_name(),
        document.points.len(),
        located
    );
    ExitCode::SUCCESS
}

fn summary(path: &str) -> ExitCode {
    let Some(document) = load(path) else {
        return ExitCode::FAILURE;
    };

    let summary = track::compute(&document.points);
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error encoding summary: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn export(path: &str, key: &str, output: Option<&Path>, utc_offset: Option<&str>) -> ExitCode {
    let format: ExportFormat = match key.parse() {
        Ok(f) => f,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let clock = match utc_offset {
        None => WallClock::Local,
        Some(offset) => match WallClock::from_offset(offset) {
            Some(clock) => clock,
            None => {
                eprintln!("Invalid UTC offset: {}", offset);
                return ExitCode::FAILURE;
            }
        },
    };

    let Some(document) = load(path) else {
        return ExitCode::FAILURE;
    };
    let exporter = Exporter::new(clock);

    let result = match output {
        None => exporter.encode_format(
            format,
            &document.metadata,
            &document.points,
            BufWriter::new(io::stdout().lock()),
        ),
        Some(target) => {
            let target = if target.is_dir() {
                target.join(file_name(&document.metadata, format.extension()))
            } else {
                target.to_path_buf()
            };
            match File::create(&target) {
                Ok(file) => {
                    log::info!("Writing {} to {}", format, target.display());
                    exporter.encode_format(
                        format,
                        &document.metadata,
                        &document.points,
                        BufWriter::new(file),
                    )
                }
                Err(e) => {
                    eprintln!("Error creating {}: {}", target.display(), e);
                    return ExitCode::FAILURE;
                }
            }
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Export failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn serve(path: &str) -> ExitCode {
    let config = match Config::from_file(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error starting runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(web::run_server(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
