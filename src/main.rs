use clap::{Parser, Subcommand, builder::styling};
use eyre::Result;
use olympics_cleaner::{
    CleaningConfig,
    cli::{self, ParseTarget},
};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};

// CLI Styling
const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::BrightWhite.on_default())
    .usage(styling::AnsiColor::BrightWhite.on_default())
    .literal(styling::AnsiColor::Green.on_default())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// Olympics Cleaner: turns scraped Olympedia biographies and results into tidy tables
#[derive(Parser)]
#[command(name = "olyclean", version, styles = STYLES)]
struct Cli {
    /// The dotenv file to source LOG_LEVEL and friends from, when present
    #[arg(short, long, global = true, default_value = ".env")]
    env: String,

    /// More verbose logging
    #[arg(long, global = true)]
    debug: bool,

    /// Command to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean bios.csv and results.csv into bios_new.csv, results_new.csv and a cross-reference report
    Clean {
        /// Raw athlete biographies table
        #[arg(short, long, default_value = "bios.csv")]
        bios: PathBuf,

        /// Raw competition results table
        #[arg(short, long, default_value = "results.csv")]
        results: PathBuf,

        /// Directory to write the cleaned tables and report to
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Cleaning configuration YAML (defaults apply when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Write the default cleaning configuration
    InitConfig {
        /// Where to write the configuration
        #[arg(default_value = "cleaning.yml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show how a single raw field value is parsed
    Parse {
        /// Which field parser to run
        #[arg(value_enum)]
        field: ParseTarget,

        /// The raw field text
        value: String,

        /// Cleaning configuration YAML (defaults apply when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if Path::new(&cli.env).exists() {
        dotenvy::from_filename(&cli.env)?;
    }

    let log_level = match cli.debug {
        true => "debug",
        false => "info",
    };
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", log_level);
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();

    match cli.command {
        Commands::Clean {
            bios,
            results,
            out_dir,
            config,
        } => {
            let config = CleaningConfig::load_or_default(config.as_deref())?;
            log::info!(
                "Cleaning {} and {} into {}",
                bios.display().bright_black(),
                results.display().bright_black(),
                out_dir.display().bright_black()
            );

            let summary = cli::clean(&bios, &results, &out_dir, &config)?;

            println!(
                "Original bios records: {}",
                summary.bios_total.to_string().cyan()
            );
            println!(
                "Cleaned bios records:  {}",
                summary.bios_retained.to_string().green()
            );
            println!(
                "Records removed:       {}",
                summary.bios_removed.to_string().yellow()
            );
            println!("Retention rate:        {:.1}%", summary.retention_rate);
            println!(
                "Results records:       {}",
                summary.results_total.to_string().cyan()
            );
            log::info!(
                "✓ Wrote {}, {} and {}",
                summary.bios_path.display().bright_black(),
                summary.results_path.display().bright_black(),
                summary.report_path.display().bright_black()
            );
        }
        Commands::InitConfig { path, force } => {
            cli::init_config(&path, force)?;
            log::info!("✓ Wrote default configuration to {}", path.display().bright_black());
        }
        Commands::Parse {
            field,
            value,
            config,
        } => {
            let config = CleaningConfig::load_or_default(config.as_deref())?;
            let parsed = cli::parse_field(field, &value, &config)?;
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
    }

    Ok(())
}
