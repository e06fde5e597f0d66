//! Barber Stats - Main entry point
//!
//! Command-line front end over the sales history: period search, reports
//! and configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use barber_stats::config::Config;
use barber_stats::display;
use barber_stats::period::{quick_periods, resolve_period, NO_MATCH_MESSAGE};
use barber_stats::report::{build_report, global_stats, ReportPreset};
use barber_stats::search::DateSearch;
use barber_stats::source::{load_report_data, HistorySource, JsonExportSource};
use barber_stats::validation::sanitize_input;

#[derive(Parser)]
#[command(name = "barber-stats")]
#[command(author, version, about = "Sales history analytics for a barbershop")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the data API's JSON export
    #[arg(short, long, global = true, env = "BARBER_STATS_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the daily history, optionally filtered to a period
    History {
        /// Period expression, e.g. "hoy", "semana pasada", "enero 2026", "15/01"
        #[arg(short, long, conflicts_with_all = ["from", "to", "day"])]
        period: Option<String>,

        /// A single day (YYYY-MM-DD or DD/MM/YYYY)
        #[arg(long, conflicts_with_all = ["from", "to"])]
        day: Option<String>,

        /// Start of a custom range (YYYY-MM-DD or DD/MM/YYYY)
        #[arg(long, requires = "to")]
        from: Option<String>,

        /// End of a custom range (YYYY-MM-DD or DD/MM/YYYY)
        #[arg(long, requires = "from")]
        to: Option<String>,
    },

    /// Show the sales report for a preset window
    Report {
        /// Window: all, today, week, 15days, 30days, 3months, year
        #[arg(short, long, default_value = "all")]
        preset: ReportPreset,
    },

    /// List the quick period shortcuts
    Periods,

    /// Resolve a period expression and print the range
    Resolve {
        /// Period expression
        expression: String,
    },

    /// Show or edit configuration
    Config {
        /// Print current configuration
        #[arg(long)]
        show: bool,

        /// Create default configuration file
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load and validate configuration
    let mut config = if let Some(ref path) = cli.config {
        Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?
    } else {
        Config::load().context("Failed to load config")?
    };
    if let Some(dir) = cli.data_dir.clone() {
        config.general.data_dir = Some(dir);
    }
    config.validate()?;

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let today = Local::now().date_naive();

    match cli.command {
        Some(Commands::History {
            period,
            day,
            from,
            to,
        }) => {
            let filter = match (period, day, from.zip(to)) {
                (Some(query), _, _) => HistoryFilter::Period(query),
                (_, Some(date), _) => HistoryFilter::Day(date),
                (_, _, Some((start, end))) => HistoryFilter::Custom(start, end),
                _ => HistoryFilter::All,
            };
            run_history(&config, today, filter).await
        }

        Some(Commands::Report { preset }) => run_report(&config, today, preset).await,

        Some(Commands::Periods) => {
            display::print_section_simple("PERÍODOS RÁPIDOS");
            for (label, expression) in quick_periods() {
                println!("  {label:<16} \"{expression}\"");
            }
            Ok(())
        }

        Some(Commands::Resolve { expression }) => {
            let query = sanitize_input(&expression, config.search.max_query_len);
            match resolve_period(&query, today) {
                Some(range) => {
                    println!("{}", serde_json::to_string_pretty(&range)?);
                    Ok(())
                }
                None => anyhow::bail!(NO_MATCH_MESSAGE),
            }
        }

        Some(Commands::Config { show, init }) => {
            if init {
                let default_config = Config::default();
                default_config.save()?;
                println!(
                    "Created default configuration at {}",
                    Config::config_path()?.display()
                );
            } else if show {
                let contents = toml::to_string_pretty(&config)?;
                println!("{contents}");
            } else {
                println!("Configuration path: {}", Config::config_path()?.display());
            }
            Ok(())
        }

        None => {
            // Default: unfiltered history
            run_history(&config, today, HistoryFilter::All).await
        }
    }
}

/// How the `history` command narrows the day list.
enum HistoryFilter {
    All,
    Period(String),
    Day(String),
    Custom(String, String),
}

async fn run_history(config: &Config, today: NaiveDate, filter: HistoryFilter) -> Result<()> {
    let source = JsonExportSource::new(config.data_dir()?);
    let history = source
        .daily_history()
        .await
        .with_context(|| format!("Failed to load history from {}", source.dir().display()))?;
    tracing::info!(days = history.len(), "Loaded daily history");

    let mut search = DateSearch::new(history, config.search);
    match filter {
        HistoryFilter::All => {}
        HistoryFilter::Period(query) => {
            search.search(&sanitize_input(&query, config.search.max_query_len), today);
        }
        HistoryFilter::Day(date) => search.search_day(&date, today),
        HistoryFilter::Custom(start, end) => search.search_custom(&start, &end, today),
    }

    let title = search
        .range()
        .map_or_else(|| "Todo el historial".to_string(), |r| r.label.clone());
    display::print_section(&format!("HISTORIAL - {}", title.to_uppercase()));

    if let Some(message) = search.error() {
        println!("\n  ! {message}");
    }

    display::print_section_simple("RESUMEN");
    if let Some(range) = search.range() {
        display::display_range(range);
    }
    display::display_history_stats(&search.stats(), today);

    if search.filtered().is_empty() {
        if search.query().is_empty() {
            println!("\nSin historial aún.");
        } else {
            println!("\nNo se encontraron datos para \"{}\".", search.query());
        }
        return Ok(());
    }

    display::print_section_simple("DÍAS");
    display::display_history(
        search.filtered(),
        today,
        config.display.bar_width,
        config.display.hide_zero_days,
    );
    println!();

    Ok(())
}

async fn run_report(config: &Config, today: NaiveDate, preset: ReportPreset) -> Result<()> {
    let source = JsonExportSource::new(config.data_dir()?);
    let (sales, prices) = load_report_data(&source)
        .await
        .with_context(|| format!("Failed to load sales from {}", source.dir().display()))?;
    tracing::info!(sales = sales.len(), services = prices.len(), "Loaded sales");

    let base_price = config.pricing.default_base_price;
    let report = build_report(&sales, &prices, preset, today, base_price);

    display::print_section(&format!(
        "ESTADÍSTICAS - {} ({} - {})",
        preset.display_name().to_uppercase(),
        display::format_date(report.start),
        display::format_date(report.end)
    ));

    display::print_section_simple("RESUMEN");
    display::display_summary(&report.summary);

    if report.summary.records == 0 {
        println!("\nNo hay ventas registradas en este período.");
        return Ok(());
    }

    display::print_section_simple("INGRESOS POR DÍA");
    display::display_daily_series(&report.daily, config.display.bar_width);

    display::print_section_simple("DISTRIBUCIÓN POR SERVICIO");
    display::display_service_breakdown(&report.services, config.display.bar_width);

    display::print_section_simple("TOTALES HISTÓRICOS");
    display::display_global_stats(&global_stats(&sales));
    println!();

    Ok(())
}
