//! CLI argument parsing using clap v4
//!
//! Defines the command-line interface for jury persona loading.

use clap::{Parser, Subcommand};

/// Jury Personas - persona pool and jury sampler
///
/// Resolves the newest generated persona batch (or committed seeds), expands
/// the pool when it is too small, and draws a stratified jury that keeps a
/// minimum share of AI skeptics.
#[derive(Parser, Debug)]
#[command(name = "jury-personas")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Draw a jury and print its composition
    Draw {
        /// Number of jurors
        #[arg(short = 'n', long)]
        size: Option<usize>,

        /// Minimum share of skeptics (0.0 - 1.0)
        #[arg(long)]
        skeptic_minimum: Option<f64>,

        /// Random seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,

        /// Personas root (holding generated/, seeds/, archetypes/)
        #[arg(short, long)]
        personas_dir: Option<String>,

        /// Write the jury to this file as JSON
        #[arg(short, long)]
        output: Option<String>,

        /// Path to configuration file
        #[arg(short, long, env = "JURY_CONFIG")]
        config: Option<String>,
    },

    /// Print distribution stats for a persona list file
    Stats {
        /// JSON file holding a list of personas
        file: String,
    },

    /// Show which generated persona file would be used
    Resolve {
        /// Personas root (holding generated/, seeds/, archetypes/)
        #[arg(short, long)]
        personas_dir: Option<String>,

        /// Path to configuration file
        #[arg(short, long, env = "JURY_CONFIG")]
        config: Option<String>,
    },

    /// Display version and build information
    Version,

    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigSubcommand {
    /// Display the current configuration
    Show {
        /// Path to configuration file
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Initialize a new configuration file
    Init {
        /// Path where to create the config file
        #[arg(short, long)]
        path: Option<String>,

        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Validate a configuration file
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        config: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_draw_defaults() {
        let cli = Cli::parse_from(["jury-personas", "draw"]);
        match cli.command {
            Commands::Draw {
                size,
                skeptic_minimum,
                seed,
                personas_dir,
                output,
                ..
            } => {
                assert!(size.is_none());
                assert!(skeptic_minimum.is_none());
                assert!(seed.is_none());
                assert!(personas_dir.is_none());
                assert!(output.is_none());
            }
            _ => panic!("Expected Draw command"),
        }
    }

    #[test]
    fn test_draw_with_options() {
        let cli = Cli::parse_from([
            "jury-personas",
            "draw",
            "-n",
            "25",
            "--skeptic-minimum",
            "0.2",
            "--seed",
            "7",
            "--personas-dir",
            "/data/personas",
            "--output",
            "jury.json",
        ]);
        match cli.command {
            Commands::Draw {
                size,
                skeptic_minimum,
                seed,
                personas_dir,
                output,
                ..
            } => {
                assert_eq!(size, Some(25));
                assert_eq!(skeptic_minimum, Some(0.2));
                assert_eq!(seed, Some(7));
                assert_eq!(personas_dir, Some("/data/personas".to_string()));
                assert_eq!(output, Some("jury.json".to_string()));
            }
            _ => panic!("Expected Draw command"),
        }
    }

    #[test]
    fn test_stats_requires_file() {
        assert!(Cli::try_parse_from(["jury-personas", "stats"]).is_err());

        let cli = Cli::parse_from(["jury-personas", "stats", "jury.json"]);
        match cli.command {
            Commands::Stats { file } => assert_eq!(file, "jury.json"),
            _ => panic!("Expected Stats command"),
        }
    }

    #[test]
    fn test_resolve() {
        let cli = Cli::parse_from(["jury-personas", "resolve", "-p", "personas"]);
        match cli.command {
            Commands::Resolve { personas_dir, .. } => {
                assert_eq!(personas_dir, Some("personas".to_string()));
            }
            _ => panic!("Expected Resolve command"),
        }
    }

    #[test]
    fn test_verbose_flags() {
        let cli = Cli::parse_from(["jury-personas", "-vv", "version"]);
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_quiet_flag() {
        let cli = Cli::parse_from(["jury-personas", "draw", "--quiet"]);
        assert!(cli.quiet);

        // Reports still go to stdout; the flag only affects logging
        let command = Cli::command();
        let quiet = command
            .get_arguments()
            .find(|arg| arg.get_id() == "quiet")
            .unwrap();
        assert_eq!(quiet.get_help().unwrap().to_string(), "Only log errors");
    }

    #[test]
    fn test_config_init() {
        let cli = Cli::parse_from(["jury-personas", "config", "init", "--force"]);
        match cli.command {
            Commands::Config {
                subcommand: ConfigSubcommand::Init { path, force },
            } => {
                assert!(path.is_none());
                assert!(force);
            }
            _ => panic!("Expected Config Init command"),
        }
    }
}
