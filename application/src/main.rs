use std::{io, sync::OnceLock};

use application::{
    args::Command, shell, view, Args, Config, Event, Service, State,
};
use common::DateTime;
use service::infra::Memory;
use tokio::io::{AsyncWriteExt as _, BufReader};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (!STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .init();

    if start().await.is_err() {
        std::process::exit(1);
    }
}

async fn start() -> Result<(), ()> {
    let Args { config, command } = Args::parse().map_err(|e| {
        log::error!("failed to parse command line arguments: {e}");
    })?;

    let Config { service, log } = Config::new(&config).map_err(|e| {
        log::error!("failed to load `Config` from `{config}`: {e}");
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let service = Service::new(service.into(), Memory::with_fixture());

    let event = match command.unwrap_or(Command::Shell) {
        Command::Shell => {
            return shell::run(
                &service,
                BufReader::new(tokio::io::stdin()),
                tokio::io::stdout(),
            )
            .await
            .map_err(|e| log::error!("shell failed: {e}"));
        }
        Command::Search { url } => Event::Navigate(url),
        Command::Home => Event::Home,
        Command::Districts => Event::ShowDistricts,
        Command::District { name } => Event::ShowDistrict(name),
    };

    let mut state = State::load(&service)
        .await
        .map_err(|e| log::error!("failed to load the catalog: {e}"))?;
    state
        .dispatch(&service, event)
        .await
        .map_err(|e| log::error!("failed to open the page: {e}"))?;
    let page = view::render(&state, DateTime::now());

    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(page.as_bytes())
        .await
        .and(stdout.flush().await)
        .map_err(|e| log::error!("failed to print results: {e}"))
}
