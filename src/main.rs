use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use worldpop::{
    config::Config,
    constants::Continent,
    format::{format_optional_fixed2, format_population, format_year},
    resources::ContinentReport,
    web::{self, WebServerConfig},
    Boundary, CommandBuffer, ElementId,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "World population explorer")]
struct Cli {
    /// Path to a YAML config file (built-in defaults when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the interactive page
    Serve {
        /// Override the configured listen host
        #[arg(long)]
        host: Option<String>,

        /// Override the configured listen port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the predicted year for a world population
    Year {
        #[arg(allow_hyphen_values = true)]
        population: i64,
    },
    /// Print the details shown when hovering a continent
    Region {
        /// Region id, e.g. asia or north-america
        region: String,

        #[arg(long, allow_hyphen_values = true)]
        population: i64,
    },
    /// Print the projected population for a calendar year
    Project {
        #[arg(allow_hyphen_values = true)]
        year: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::from_yaml(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    match cli.command {
        Command::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.web.host.clone());
            let port = port.unwrap_or(config.web.port);
            web::run(WebServerConfig { config, host, port }).await?;
        }
        Command::Year { population } => {
            let mut controller = config.build_controller()?;
            let mut boundary = CommandBuffer::new(population);
            controller.on_control_change(boundary.read_control_value(), &mut boundary);
            for (label, element) in [
                ("Current Population", ElementId::Population),
                ("Maximum Capacity", ElementId::MaxPopulation),
                ("Predicted Year", ElementId::PredictedYear),
            ] {
                println!("{label}: {}", boundary.last_text(element).unwrap_or_default());
            }
        }
        Command::Region { region, population } => {
            let Some(continent) = Continent::from_region_id(&region) else {
                anyhow::bail!("unknown region '{region}'");
            };
            if population < 0 {
                println!("Population data is not available for negative values.");
                return Ok(());
            }
            let report = ContinentReport::compute(
                continent,
                config.continent_table()?.profile(continent),
                population,
                config.growth.initial_population,
            );
            println!("{}: {}", continent.display_name(), format_population(report.population));
            println!(
                "Average Space per Person: {} m²",
                format_optional_fixed2(report.space_per_person_m2)
            );
            println!(
                "Average Water per Person per Day: {} liters",
                format_optional_fixed2(report.water_liters_per_day)
            );
            println!(
                "Average Food per Person per Day: {} kg",
                format_optional_fixed2(report.food_kg_per_day)
            );
        }
        Command::Project { year } => {
            let population = config.growth_model().predicted_population_for_year(year);
            println!("{}: {}", format_year(year), format_population(population));
        }
    }
    Ok(())
}
