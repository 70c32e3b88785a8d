//! `smdb`: terminal shell for the movie catalog.

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use movie_core::{AppConfig, HttpMovieApi};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod args;
mod render;

use app::App;
use args::{Command, USAGE};

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "smdb=info,movie_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cmd = Command::parse(std::env::args().skip(1))?;
    if cmd.help {
        println!("{USAGE}");
        return Ok(());
    }

    let config = AppConfig::from_env()?;
    tracing::debug!(
        base_url = %config.client.base_url,
        timeout = ?config.client.timeout,
        "loaded configuration"
    );
    let api = HttpMovieApi::from_config(&config.client);

    let stdin = io::stdin();
    App::new(&api, &config.view, io::stdout().lock(), stdin.lock()).run(&cmd)
}
