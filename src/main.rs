//! jury-personas - persona pool and jury sampler
//!
//! Entry point for the `jury-personas` binary.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, info};

use jury_personas::cli::{Cli, Commands, ConfigSubcommand};
use jury_personas::config::{self, JuryConfig, LoggingSettings};
use jury_personas::error::{Error, Result};
use jury_personas::logging;
use jury_personas::persona::{
    get_persona_stats, read_persona_file, JuryDraw, PersonaLoader, PersonaPaths,
};
use jury_personas::version;

fn main() {
    // Parse CLI arguments first (before logging, so we know verbosity)
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprint!("{}", e.format_for_terminal());
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Version => {
            version::print_version();
            Ok(())
        }
        Commands::Config { subcommand } => {
            logging::init_simple(tracing::Level::WARN)?;
            handle_config_command(subcommand)
        }
        Commands::Stats { file } => {
            let _log_guards =
                logging::init_logging(&LoggingSettings::default(), cli.verbose, cli.quiet)?;
            let path = PathBuf::from(config::expand_path(&file));
            let personas = read_persona_file(&path)?;
            print!("{}", get_persona_stats(&personas));
            Ok(())
        }
        Commands::Resolve {
            personas_dir,
            config,
        } => {
            let mut cfg = JuryConfig::load(config.as_deref())?;
            if let Some(dir) = personas_dir {
                cfg.personas.root = config::expand_path(&dir);
            }
            let _log_guards = logging::init_logging(&cfg.logging, cli.verbose, cli.quiet)?;
            resolve(&cfg.personas_root());
            Ok(())
        }
        Commands::Draw {
            size,
            skeptic_minimum,
            seed,
            personas_dir,
            output,
            config,
        } => {
            let mut cfg = JuryConfig::load(config.as_deref())?;

            // CLI flags override file and environment
            if let Some(size) = size {
                cfg.jury.size = size;
            }
            if let Some(minimum) = skeptic_minimum {
                cfg.jury.skeptic_minimum = minimum;
            }
            if seed.is_some() {
                cfg.jury.seed = seed;
            }
            if let Some(dir) = personas_dir {
                cfg.personas.root = config::expand_path(&dir);
            }
            cfg.validate()?;

            let _log_guards = logging::init_logging(&cfg.logging, cli.verbose, cli.quiet)?;
            let build = version::BuildInfo::current();
            debug!(version = %build.full_version(), "Starting jury draw");

            draw(&cfg, output.as_deref())
        }
    }
}

fn draw(cfg: &JuryConfig, output: Option<&str>) -> Result<()> {
    let loader = PersonaLoader::new(cfg.personas_root());
    let mut rng = match cfg.jury.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    let draw = loader.draw_jury(cfg.jury.size, cfg.jury.skeptic_minimum, &mut rng)?;
    info!(
        jurors = draw.personas.len(),
        source = %draw.source,
        "Jury drawn"
    );

    print_draw_summary(&draw);
    print!("{}", get_persona_stats(&draw.personas));

    if let Some(output) = output {
        let path = PathBuf::from(config::expand_path(output));
        write_jury(&path, &draw)?;
        println!();
        println!("Jury written to {}", path.display());
    }

    Ok(())
}

fn print_draw_summary(draw: &JuryDraw) {
    match draw.generated_file {
        Some(ref file) => println!("Source: {} ({})", draw.source, file.display()),
        None => println!("Source: {}", draw.source),
    }
    if draw.seed_count > 0 || draw.expanded_count > 0 {
        println!(
            "Seeds: {}, expanded: {}",
            draw.seed_count, draw.expanded_count
        );
    }
    println!();
}

fn write_jury(path: &Path, draw: &JuryDraw) -> Result<()> {
    let json = serde_json::to_string_pretty(&draw.personas)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::IoWrite {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }
    fs::write(path, json).map_err(|e| Error::IoWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

fn resolve(root: &Path) {
    let paths = PersonaPaths::new(root);
    match paths.latest_generated_file() {
        Some(file) => println!("{}", file.display()),
        None => println!(
            "No generated personas under {}",
            paths.generated_dir().display()
        ),
    }
}

fn handle_config_command(subcommand: ConfigSubcommand) -> Result<()> {
    match subcommand {
        ConfigSubcommand::Show { config } => {
            let cfg = JuryConfig::load(config.as_deref())?;
            println!("{}", toml::to_string_pretty(&cfg)?);
        }
        ConfigSubcommand::Init { path, force } => {
            let written = config::init_config(path.as_deref(), force)?;
            println!("Configuration written to {}", written.display());
        }
        ConfigSubcommand::Validate { config } => {
            JuryConfig::load(config.as_deref())?;
            println!("Configuration is valid.");
        }
    }

    Ok(())
}
