use std::io::IsTerminal;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use weatherdash::appearance::ThemeMode;
use weatherdash::location_resolver::{LocationParser, LocationQuery};
use weatherdash::weather::codes::{self, CodeStyle};
use weatherdash::{Coordinates, Dashboard, DashboardConfig, FlowOutcome, render, telemetry, web};

mod cli;

use cli::{Cli, Command, ShowArgs};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = DashboardConfig::load_from_path(cli.config.clone())
        .context("Failed to load configuration")?;
    telemetry::init_tracing(&config.logging, cli.verbose)?;
    info!("weatherdash {}", weatherdash::VERSION);

    match cli.cmd {
        Command::Show(args) => show(config, args).await,
        Command::Code { code, emoji } => {
            let style = if emoji { CodeStyle::Emoji } else { CodeStyle::Plain };
            println!("{} {}", codes::icon(code), codes::describe(code, style));
            Ok(())
        }
        Command::Serve { port } => {
            let port = port.unwrap_or(config.server.port);
            let dashboard = Arc::new(Dashboard::from_config(config)?);
            web::run(port, dashboard).await
        }
    }
}

async fn show(mut config: DashboardConfig, args: ShowArgs) -> Result<()> {
    if args.emoji {
        config.appearance.code_style = CodeStyle::Emoji;
    }
    if args.dark {
        config.appearance.theme = ThemeMode::Dark;
    }

    let query = match (&args.city, args.lat.zip(args.lon), &args.location) {
        (Some(city), _, _) => Some(LocationQuery::Text(city.clone())),
        (None, Some((lat, lon)), _) => Some(LocationQuery::Coordinates(Coordinates::new(lat, lon))),
        (None, None, Some(text)) => Some(LocationParser::parse(text)?),
        (None, None, None) => None,
    };

    let dashboard = Dashboard::from_config(config)?;
    let outcome = if args.no_cities {
        match query {
            Some(query) => dashboard.show(query).await,
            None => dashboard.locate().await,
        }
    } else {
        dashboard.start(query).await
    };

    let page = dashboard.page().await;
    print!("{}", render::render(&page, std::io::stdout().is_terminal()));

    if outcome == FlowOutcome::Failed {
        std::process::exit(1);
    }
    Ok(())
}
