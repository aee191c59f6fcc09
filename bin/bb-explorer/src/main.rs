//! # bb-explorer Binary
//!
//! Assembles the explorer from its plugins, keeps the status poller running,
//! and drives the navigator from stdin. Each screen is printed to stdout as
//! JSON; logs go to stderr.

use std::sync::Arc;

use bb_config::{LogSettings, Settings};
use bb_core::traits::BulletinApi;
use bb_views::{Navigator, Screen, StatusCache, StatusPoller};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[cfg(feature = "rest-http")]
use bb_rest_http::HttpBulletinApi;

#[cfg(not(feature = "rest-http"))]
compile_error!("bb-explorer needs a backend client; enable the `rest-http` feature");

/// One line of input.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Go(&'a str),
    Open(&'a str),
    Back,
    Forward,
    Reverse,
    Show,
    Quit,
    Unknown(&'a str),
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        if line.starts_with('/') {
            return Self::Go(line);
        }
        match line.split_once(' ') {
            Some(("open", name)) => Self::Open(name.trim()),
            _ => match line {
                "open" => Self::Open(""),
                "back" => Self::Back,
                "forward" => Self::Forward,
                "reverse" => Self::Reverse,
                "" | "show" => Self::Show,
                "quit" | "exit" => Self::Quit,
                other => Self::Unknown(other),
            },
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?;
    init_tracing(&settings.log);

    // 1. Initialize the backend client
    #[cfg(feature = "rest-http")]
    let api: Arc<dyn BulletinApi> = Arc::new(HttpBulletinApi::new(
        &settings.api.base_url,
        settings.request_timeout(),
    )?);

    // 2. Start polling status for the lifetime of the process
    let status = StatusCache::new();
    let poller = StatusPoller::new(Arc::clone(&api), status.clone(), settings.status_interval()).spawn();

    // 3. Wire the navigator
    let nav = Navigator::new(api, status);
    let mut screens = nav.subscribe();

    info!(
        "bb-explorer reading paths from stdin, backend at {}",
        settings.api.base_url
    );

    let start = std::env::args().nth(1).unwrap_or_else(|| "/".to_string());
    nav.navigate(&start).await;
    print_screen(&mut screens)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Command::Go(path) => {
                nav.navigate(path).await;
            }
            Command::Open(name) => {
                nav.open_board(name).await;
            }
            Command::Back => {
                if let Err(e) = nav.previous_day().await {
                    warn!("back: {e}");
                }
            }
            Command::Forward => {
                if let Err(e) = nav.next_day().await {
                    warn!("forward: {e}");
                }
            }
            Command::Reverse => {
                if !nav.reverse_block() {
                    warn!("reverse: no block on screen");
                }
            }
            Command::Show => {}
            Command::Quit => break,
            Command::Unknown(other) => {
                warn!("unknown command {other:?}");
                continue;
            }
        }
        print_screen(&mut screens)?;
    }

    poller.abort();
    Ok(())
}

fn init_tracing(log: &LogSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Prints the latest published screen and marks it seen.
fn print_screen(screens: &mut watch::Receiver<Screen>) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&*screens.borrow_and_update())?);
    Ok(())
}
