mod logging;

use std::{path::PathBuf, thread::sleep, time::Duration};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use homework_notifier::{
    Credentials, Error, Session,
    practicum::{self, PracticumClient},
    telegram::TelegramClient,
};
use reqwest::Url;

/// Practicum Homework Notification Bot
///
/// Credentials are read from `PRACTICUM_TOKEN`, `TELEGRAM_TOKEN` and
/// `TELEGRAM_CHAT_ID` (a `.env` file in the working directory is honored).
#[derive(Parser)]
struct Args {
    /// Seconds to wait between two polls of the homework API
    #[arg(short, long, env = "RETRY_PERIOD", default_value_t = 600)]
    retry_period: u64,

    /// File receiving a copy of every log line (truncated on startup)
    #[arg(short, long, env = "LOG_FILE", default_value = "homework.log")]
    log_file: PathBuf,

    /// The homework status endpoint to poll
    #[arg(short, long, default_value = practicum::ENDPOINT)]
    endpoint: Url,
}

const STARTUP_MESSAGE: &str = "Бот заработал";

struct App {
    practicum_client: PracticumClient,
    telegram_client: TelegramClient,
    chat_id: String,
    session: Session,
}

impl App {
    #[must_use]
    const fn new(
        practicum_client: PracticumClient,
        telegram_client: TelegramClient,
        chat_id: String,
        session: Session,
    ) -> Self {
        Self {
            practicum_client,
            telegram_client,
            chat_id,
            session,
        }
    }

    fn iteration(&mut self) -> Result<(), Error> {
        log::debug!("Iteration");

        let response = self
            .practicum_client
            .fetch_statuses(self.session.timestamp())?;
        let Some(message) = self.session.advance(&response)? else {
            return Ok(());
        };
        drop(response);

        self.telegram_client.send_message(&self.chat_id, &message)?;
        log::info!("Sent notification: {message}");
        self.session.mark_sent(message);
        Ok(())
    }
}

fn main() -> Result<()> {
    // Must happen before parsing so that `.env` can provide the flags too.
    let dotenv = dotenvy::dotenv();
    let args = Args::parse();
    logging::init(&args.log_file)?;

    match dotenv {
        Ok(path) => log::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => log::warn!("Could not load .env file: {e}"),
    }

    let credentials = Credentials::from_env()
        .inspect_err(|e| log::error!("{:#}", anyhow::Error::from(e.clone())))
        .context("Cannot start without credentials")?;
    log::debug!("Using {credentials:?}");

    let telegram_client = TelegramClient::new(&credentials.telegram_token)
        .context("Could not create Telegram Bot client")?;
    let practicum_client = PracticumClient::new(credentials.practicum_token, args.endpoint);
    let mut app = App::new(
        practicum_client,
        telegram_client,
        credentials.telegram_chat_id,
        Session::new(Utc::now().timestamp()),
    );

    if let Err(e) = app
        .telegram_client
        .send_message(&app.chat_id, STARTUP_MESSAGE)
    {
        log::error!("Could not send startup message: {:#}", anyhow::Error::from(e));
    }
    log::info!("{STARTUP_MESSAGE}");

    let retry_period = Duration::from_secs(args.retry_period);
    loop {
        if let Err(e) = app.iteration() {
            log::error!("Program failure: {:#}", anyhow::Error::from(e));
        }
        sleep(retry_period);
    }
}
