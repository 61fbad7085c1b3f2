use clap::{Parser, Subcommand, builder::styling};
use eyre::{Result, WrapErr};
use kibctl::kibana::{format_table, list_dashboards};
use kibctl::{Config, ConnectionArgs, DashboardExporter, DashboardImporter, Error};
use owo_colors::OwoColorize;
use std::io::{Read, Write};

// CLI Styling
const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::BrightWhite.on_default())
    .usage(styling::AnsiColor::BrightWhite.on_default())
    .literal(styling::AnsiColor::Green.on_default())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// kibctl is a cli tool for kibana
#[derive(Parser)]
#[command(name = "kibctl", version, styles = STYLES)]
struct Cli {
    /// The dotenv file to source credentials from
    #[arg(short, long, global = true, default_value = ".env")]
    env: String,

    /// Provide additional details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    connection: ConnectionArgs,

    /// Command to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage dashboards
    #[command(subcommand)]
    Dashboard(DashboardCommands),
}

#[derive(Subcommand)]
enum DashboardCommands {
    /// Import the dashboard definition read from stdin
    Import,

    /// Export a json including the visualisations and index-pattern dependencies
    Export {
        /// Exact title of the dashboard to export
        name: Option<String>,
    },

    /// List dashboards with title matching the pattern
    List {
        /// Title search pattern; lists every dashboard when omitted
        pattern: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.use_stderr() => {
            let _ = err.print();
            std::process::exit(1);
        }
        Err(err) => err.exit(),
    };

    if let Err(report) = run(cli).await {
        let code = report
            .downcast_ref::<Error>()
            .map_or(2, Error::exit_code);
        eprintln!("{} {:#}", "Error:".red(), report);
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let env_loaded = kibctl::config::load_env_file(&cli.env)?;

    let log_level = match cli.verbose {
        true => "debug",
        false => "info",
    };
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", log_level);
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();

    if env_loaded {
        log::debug!("Sourced environment from {}", cli.env.bright_black());
    }

    match cli.command {
        Commands::Dashboard(DashboardCommands::Import) => import(&cli.connection).await,
        Commands::Dashboard(DashboardCommands::Export { name }) => {
            export(&cli.connection, name).await
        }
        Commands::Dashboard(DashboardCommands::List { pattern }) => {
            list(&cli.connection, pattern).await
        }
    }
}

async fn import(connection: &ConnectionArgs) -> Result<()> {
    let config = Config::resolve(connection, false)?;

    let mut payload = Vec::new();
    std::io::stdin()
        .read_to_end(&mut payload)
        .wrap_err("could not read import input")?;

    let importer = DashboardImporter::new(config.client()?);
    let details = importer.import(&payload).await?;
    log::info!(
        "{} imported dashboard into {}",
        "SUCCESS".green(),
        config.host.bright_black()
    );
    log::info!("{}", details);
    Ok(())
}

async fn export(connection: &ConnectionArgs, name: Option<String>) -> Result<()> {
    let config = Config::resolve(connection, true)?;
    let name = name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| Error::validation("dashboard name missing"))?;

    let exporter = DashboardExporter::new(config.client()?);
    let payload = exporter.export(&name).await?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(&payload)
        .and_then(|_| stdout.flush())
        .wrap_err("could not write export to stdout")?;
    Ok(())
}

async fn list(connection: &ConnectionArgs, pattern: Option<String>) -> Result<()> {
    let config = Config::resolve(connection, true)?;
    let pattern = pattern.filter(|pattern| !pattern.is_empty());

    let dashboards = list_dashboards(&config.client()?, pattern.as_deref()).await?;
    log::debug!("Found {} dashboard(s)", dashboards.len());
    print!("{}", format_table(&dashboards));
    Ok(())
}
