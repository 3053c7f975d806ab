//! stellar-mapper CLI
//!
//! Reads a nearby-star catalog, builds the jump network and writes it as
//! JSON. Statistics go to stdout; logs go to stderr.

// Exclude from coverage - CLI binary tested via integration tests
#![cfg_attr(tarpaulin, ignore)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use stellar_mapper::core::{connected_components, DEFAULT_CONFIG_FILE};
use stellar_mapper::formats::{read_catalog, read_network, write_network};
use stellar_mapper::{MapperConfig, Network, NetworkGenerator, NetworkStatistics};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Generate a jump network of nearby star systems.
///
/// Systems are connected along Delaunay tetrahedralization edges no longer
/// than the jump distance.
#[derive(Parser, Debug)]
#[command(name = "stellar-mapper")]
#[command(version = stellar_mapper::VERSION)]
#[command(about = "Generate a jump network of nearby star systems")]
#[command(after_help = "EXAMPLES:
  # Build a network with the default 10 pc jump distance
  stellar-mapper nearby_stars.csv network.json

  # Longer jumps, white dwarfs included
  stellar-mapper nearby_stars.csv network.json 15 --include-wd

  # Report on an existing network
  stellar-mapper --check network.json --components
")]
struct Cli {
    // ═══════════════════════════════════════════════════════════════════════════
    // INPUT / OUTPUT
    // ═══════════════════════════════════════════════════════════════════════════

    /// Catalog CSV file
    #[arg(
        value_name = "INPUT",
        required_unless_present = "check",
        help_heading = "INPUT / OUTPUT"
    )]
    input: Option<PathBuf>,

    /// Network JSON file to write
    #[arg(
        value_name = "OUTPUT",
        required_unless_present = "check",
        help_heading = "INPUT / OUTPUT"
    )]
    output: Option<PathBuf>,

    /// Maximum jump distance in parsecs [default: 10]
    #[arg(value_name = "JUMP_DISTANCE", help_heading = "INPUT / OUTPUT")]
    jump_distance: Option<f64>,

    /// Report on an existing network JSON instead of generating one
    #[arg(
        long = "check",
        value_name = "NETWORK",
        conflicts_with_all = ["input", "output", "jump_distance"],
        help_heading = "INPUT / OUTPUT"
    )]
    check: Option<PathBuf>,

    /// Config file path [default: ./.stellar_mapper.json when present]
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help_heading = "INPUT / OUTPUT"
    )]
    config: Option<PathBuf>,

    // ═══════════════════════════════════════════════════════════════════════════
    // CATEGORY FILTERS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Include low-mass objects (LM, LM?)
    #[arg(long = "include-lm", help_heading = "CATEGORY FILTERS")]
    include_lm: bool,

    /// Include white dwarfs (WD, WD?)
    #[arg(long = "include-wd", help_heading = "CATEGORY FILTERS")]
    include_wd: bool,

    /// Include brown dwarfs (BD, BD?)
    #[arg(long = "include-bd", help_heading = "CATEGORY FILTERS")]
    include_bd: bool,

    // ═══════════════════════════════════════════════════════════════════════════
    // REPORTING
    // ═══════════════════════════════════════════════════════════════════════════

    /// List the systems in each connected component
    #[arg(long = "components", help_heading = "REPORTING")]
    components: bool,

    /// Debug logging
    #[arg(
        short = 'v',
        long = "verbose",
        conflicts_with = "quiet",
        help_heading = "REPORTING"
    )]
    verbose: bool,

    /// Warnings and errors only
    #[arg(short = 'q', long = "quiet", help_heading = "REPORTING")]
    quiet: bool,
}

fn main() {
    // Fix broken pipe panic when piping to head/tail/etc.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }

    let cli = Cli::parse();
    init_tracing(&cli);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(cli: &Cli) {
    let default_filter = if cli.verbose {
        "stellar_mapper=debug,mapper_delaunay=debug"
    } else if cli.quiet {
        "stellar_mapper=warn"
    } else {
        "stellar_mapper=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    if let Some(network_path) = &cli.check {
        let network = read_network(network_path)?;
        info!(path = %network_path.display(), "loaded network");
        report(&network, cli.components);
        return Ok(());
    }

    // clap enforces both when --check is absent
    let (Some(input), Some(output)) = (&cli.input, &cli.output) else {
        anyhow::bail!("INPUT and OUTPUT are required unless --check is given");
    };

    let config = load_config(cli)?;
    let rows = read_catalog(input)?;
    info!(rows = rows.len(), path = %input.display(), "catalog loaded");

    let network = NetworkGenerator::with_tolerance(config.coincidence_tolerance)?
        .generate(&rows, &config.generation_params())?;

    if !network.is_connected() && !network.systems.is_empty() {
        warn!(
            components = network.component_count(),
            "network is not connected; try a larger jump distance"
        );
    }

    write_network(&network, output)
        .with_context(|| format!("failed to write network to {}", output.display()))?;
    info!(path = %output.display(), "network written");

    report(&network, cli.components);
    Ok(())
}

/// Config file (explicit or default), then CLI overrides
fn load_config(cli: &Cli) -> Result<MapperConfig> {
    let mut config = match &cli.config {
        Some(path) => MapperConfig::from_file(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            MapperConfig::from_file(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => MapperConfig::default(),
    };

    if let Some(jump_distance) = cli.jump_distance {
        config.jump_distance = jump_distance;
    }
    config.include_low_mass |= cli.include_lm;
    config.include_white_dwarf |= cli.include_wd;
    config.include_brown_dwarf |= cli.include_bd;

    config.validate()?;
    Ok(config)
}

fn report(network: &Network, list_components: bool) {
    print!("{}", NetworkStatistics::from_network(network));

    if list_components {
        for (i, members) in connected_components(&network.systems, &network.edges)
            .iter()
            .enumerate()
        {
            let names: Vec<&str> = members
                .iter()
                .map(|id| network.system(*id).map_or("?", |s| s.name.as_str()))
                .collect();
            println!(
                "  Component {} ({} systems): {}",
                i + 1,
                members.len(),
                names.join(", ")
            );
        }
    }
}
