use clap::{Parser, Subcommand, builder::styling};
use eyre::Result;
use payroll_etl::cli::{inspect, run_payroll};
use std::path::Path;

// CLI Styling
const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::BrightWhite.on_default())
    .usage(styling::AnsiColor::BrightWhite.on_default())
    .literal(styling::AnsiColor::Green.on_default())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// Payroll ETL: derive tax and net salary for every employee with a salary
#[derive(Parser)]
#[command(name = "payroll-etl", version, styles = STYLES)]
struct Cli {
    /// The dotenv file to source default paths from
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
    /// Extract, transform and load a payroll file
    Run {
        /// Input CSV file [env: PAYROLL_SOURCE]
        source: Option<String>,

        /// Output CSV file, replaced if it exists [env: PAYROLL_DESTINATION]
        destination: Option<String>,

        /// Field delimiter used for both files
        #[arg(short, long, default_value_t = ',')]
        delimiter: char,

        /// Print the run report as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Show the columns and row counts of an input file without writing anything
    Inspect {
        /// Input CSV file [env: PAYROLL_SOURCE]
        source: Option<String>,

        /// Field delimiter
        #[arg(short, long, default_value_t = ',')]
        delimiter: char,
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
        Commands::Run {
            source,
            destination,
            delimiter,
            json,
        } => {
            let report = run_payroll(source, destination, delimiter)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        }
        Commands::Inspect { source, delimiter } => {
            let inspection = inspect(source, delimiter)?;
            println!("{}", serde_json::to_string_pretty(&inspection)?);
        }
    }

    Ok(())
}
