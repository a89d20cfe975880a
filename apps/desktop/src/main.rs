mod repl;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use game_core::{
    load_settings, load_settings_from, wikipedia::article_href, ContentAdapter, GameCoordinator,
    GameSession, Settings, WikipediaProvider,
};
use shared::protocol::ArenaRect;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::repl::{parse_command, render_view, ReplCommand, HELP};

#[derive(Parser, Debug)]
#[command(name = "spectrum", about = "This-vs-that positioning game on Wikipedia content")]
struct Cli {
    /// Settings file; defaults to ./spectrum.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print random articles that carry a thumbnail.
    Random {
        #[arg(long, default_value_t = 4)]
        count: usize,
    },
    /// Print thumbnail-bearing search results, best match first.
    Search { query: String },
    /// Deal one round and print the resulting view as json.
    Round,
    /// Interactive game on stdin.
    Play {
        #[arg(long, default_value_t = 400.0)]
        width: f32,
        #[arg(long, default_value_t = 400.0)]
        height: f32,
    },
}

fn settings_for(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => load_settings_from(path)?,
        None => load_settings(),
    };
    if let Some(api_url) = &cli.api_url {
        settings.api_url = api_url.clone();
    }
    settings.validate()?;
    Ok(settings)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    let settings = settings_for(&cli)?;

    let provider = WikipediaProvider::new(&settings)?;
    let adapter = ContentAdapter::from_settings(Arc::new(provider), &settings);
    let article_url = settings.article_url()?;

    match cli.command {
        Command::Random { count } => {
            for item in adapter.fetch_random_batch(count).await {
                println!(
                    "{}\t{}\t{}",
                    item.title,
                    article_href(&article_url, item.id),
                    item.thumbnail_url.unwrap_or_default()
                );
            }
        }
        Command::Search { query } => {
            let items = adapter.search_content(&query).await;
            if items.is_empty() {
                println!("No content found for \"{query}\"");
            }
            for item in items {
                println!("{}\t{}", item.title, article_href(&article_url, item.id));
            }
        }
        Command::Round => {
            let session = GameSession::new(adapter);
            let mut game = GameCoordinator::new(ArenaRect::sized(400.0, 400.0), article_url);
            session.start_round(&mut game).await;
            println!("{}", serde_json::to_string_pretty(&game.view())?);
        }
        Command::Play { width, height } => {
            let session = GameSession::new(adapter);
            let game = GameCoordinator::new(ArenaRect::sized(width, height), article_url);
            play(session, game).await?;
        }
    }

    Ok(())
}

async fn play(session: GameSession, mut game: GameCoordinator) -> Result<()> {
    info!("dealing first round");
    session.start_round(&mut game).await;

    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(render_view(&game.view()).as_bytes())
        .await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await.context("failed to read stdin")? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let output = match parse_command(&line) {
            Ok(ReplCommand::Events(events)) => {
                for event in events {
                    session.dispatch(&mut game, event).await;
                }
                render_view(&game.view())
            }
            Ok(ReplCommand::View) => format!("{}\n", serde_json::to_string_pretty(&game.view())?),
            Ok(ReplCommand::Help) => format!("{HELP}\n"),
            Ok(ReplCommand::Quit) => break,
            Err(err) => format!("error: {err:#}\n"),
        };
        stdout.write_all(output.as_bytes()).await?;
    }
    Ok(())
}
