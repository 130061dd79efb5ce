use crate::config::LongitudeMode;
use crate::utils::constants::DEFAULT_SAMPLE_ROWS;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "argo-lookup")]
#[command(about = "Build JSON lookup tables from the Argo GDAC profile index")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Suppress report lines and progress")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        default_value = ".",
        help = "Project root holding the data/ and docs/ directories"
    )]
    pub root: PathBuf,

    #[arg(long, global = true, help = "TOML file overriding the directory layout")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Input/local output directory [default: <root>/data]")]
    pub data_dir: Option<PathBuf>,

    #[arg(long, global = true, help = "Publishable output directory [default: <root>/docs]")]
    pub docs_dir: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Index file name inside the data directory [default: ar_index_global_prof.txt]"
    )]
    pub index_file: Option<String>,
}

/// Filter and derivation overrides shared by the table-building commands.
#[derive(Args, Clone, Debug, Default)]
pub struct FilterArgs {
    #[arg(long, help = "Keep only delayed-mode core profiles (D*.nc)")]
    pub delayed_mode_only: bool,

    #[arg(long, value_enum, help = "Longitude convention for lon_round")]
    pub longitude_mode: Option<LongitudeMode>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the full lookup table (data/search_table.json + docs/search_table.json.gz)
    Build {
        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long, help = "Stop after this many data rows")]
        row_limit: Option<usize>,

        #[arg(long, help = "Skip the gzip copy in docs/")]
        no_gzip: bool,
    },

    /// Build one lookup table per year (docs/<YEAR>.json), longitudes in [0, 360)
    ByYear {
        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long, help = "Stop after this many data rows")]
        row_limit: Option<usize>,
    },

    /// Build a small sample table for local testing of the web app
    Sample {
        #[arg(default_value_t = DEFAULT_SAMPLE_ROWS, help = "Number of data rows to keep")]
        rows: usize,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Report latitude/longitude extents and placeholder coordinates
    Extent,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_sample_default_rows() {
        let cli = Cli::try_parse_from(["argo-lookup", "sample"]).unwrap();
        match cli.command {
            Commands::Sample { rows, filters } => {
                assert_eq!(rows, DEFAULT_SAMPLE_ROWS);
                assert!(!filters.delayed_mode_only);
            }
            _ => panic!("expected sample command"),
        }
    }

    #[test]
    fn test_by_year_overrides() {
        let cli = Cli::try_parse_from([
            "argo-lookup",
            "by-year",
            "--delayed-mode-only",
            "--longitude-mode",
            "signed",
            "--root",
            "/repo",
        ])
        .unwrap();
        assert_eq!(cli.root, PathBuf::from("/repo"));
        match cli.command {
            Commands::ByYear { filters, row_limit } => {
                assert!(filters.delayed_mode_only);
                assert_eq!(filters.longitude_mode, Some(LongitudeMode::Signed));
                assert_eq!(row_limit, None);
            }
            _ => panic!("expected by-year command"),
        }
    }
}
