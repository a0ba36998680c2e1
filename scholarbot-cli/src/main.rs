//! `scholarbot`: chat with the scholarship Q&A assistant from a terminal.

mod args;
mod commands;
mod terminal;

use std::time::Duration;

use clap::Parser;
use scholarbot_client::ChatClient;
use scholarbot_session::{Session, SessionConfig};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::args::Args;
use crate::commands::{Command, parse_line};
use crate::terminal::TerminalPresenter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let client = ChatClient::new(&args.url).request_timeout(Duration::from_secs(args.timeout_secs));
    let config = SessionConfig::default()
        .default_lang(&args.lang)
        .mode(args.mode);
    let presenter = TerminalPresenter::new(std::io::stdout(), config.mode);

    tracing::info!(url = %args.url, lang = %args.lang, mode = %args.mode, "starting session");
    let mut session = Session::new(client, presenter, config);
    session.start().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let prompt_open = session.feedback().prompt().is_some();
        session.presenter_mut().input_prompt(prompt_open);

        let Some(line) = lines.next_line().await? else {
            break;
        };
        match parse_line(&line, prompt_open) {
            Command::Quit => break,
            Command::Actions(actions) => {
                for action in actions {
                    session.dispatch(action).await;
                }
            }
            Command::Unknown(input) => session.presenter_mut().notice(&format!(
                "unknown command {input:?}; try /help, /clear, /lang <code>, /ask <1-5>, /like <id>, /dislike <id>, /quit"
            )),
        }
    }

    session.flush_feedback().await;
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
