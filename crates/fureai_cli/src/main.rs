mod command;

use anyhow::Context;
use clap::Parser;
use command::ReplCommand;
use fureai_core::{FureaiConfig, Reply, TouchSession};
use fureai_haptics::{HapticDriver, TickConfig, TracingActuator};
use serde::Serialize;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "fureai.toml", env = "FUREAI_CONFIG")]
    config: PathBuf,

    /// Voice gender (overrides config)
    #[arg(short, long)]
    gender: Option<String>,

    /// Player tick period in milliseconds (overrides config)
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Print replies without playing vibration patterns
    #[arg(long)]
    no_haptics: bool,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", text);
    Ok(())
}

async fn play(driver: Option<&HapticDriver>, reply: &Reply) {
    let (Some(driver), Some(vibration)) = (driver, reply.vibration.as_ref()) else {
        return;
    };
    if let Err(e) = driver.load(vibration.vibration_pattern.clone()).await {
        warn!("Could not play vibration: {:#}", e);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    info!("Initializing Fureai...");

    // 1. Load config
    let mut config = FureaiConfig::load_or_default(&args.config);
    if let Some(gender) = args.gender {
        config.session.gender = gender;
    }
    if let Some(ms) = args.tick_ms {
        config.haptics.tick_interval_ms = ms;
    }
    if args.no_haptics {
        config.haptics.enabled = false;
    }

    // 2. Start the haptic driver
    let driver = if config.haptics.enabled {
        let tick = TickConfig::from_millis(config.haptics.tick_interval_ms);
        info!("Starting haptic driver with {:?} tick", tick.interval);
        Some(HapticDriver::spawn(TracingActuator::new("vibration"), tick))
    } else {
        info!("Haptics disabled");
        None
    };

    // 3. Open the session
    let mut session = TouchSession::new(&config.session, config.generator.clone());
    info!(
        "Session started at {} (gender: {})",
        session.started_at(),
        session.gender()
    );

    eprintln!("Fureai online. One JSON touch per line, e.g. {{\"data\": 0.5, \"touched_area\": \"頭\"}}");
    eprintln!("Commands: reset, stop, idle, status, quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        match ReplCommand::parse(&line) {
            ReplCommand::Empty => continue,
            ReplCommand::Quit => break,
            ReplCommand::Reset => {
                session.reset();
                if let Some(d) = driver.as_ref() {
                    d.stop().await?;
                }
                print_json(&session.idle_reply())?;
            }
            ReplCommand::Stop => match driver.as_ref() {
                Some(d) => d.stop().await?,
                None => warn!("Haptics disabled, nothing to stop"),
            },
            ReplCommand::Idle => print_json(&session.idle_reply())?,
            ReplCommand::Status => match driver.as_ref() {
                Some(d) => print_json(&d.status())?,
                None => warn!("Haptics disabled, no player status"),
            },
            ReplCommand::Touch(turn) => {
                let reply = session.process(&turn);
                print_json(&reply)?;
                play(driver.as_ref(), &reply).await;
            }
            ReplCommand::Invalid(reason) => {
                error!("Invalid input: {}", reason);
                print_json(&serde_json::json!({
                    "error": reason,
                    "message": "正しいJSON形式で入力してください。",
                }))?;
            }
        }
    }

    if let Some(d) = driver.as_ref() {
        d.stop().await.ok();
    }
    info!("Session ended after {} turns", session.turns());
    Ok(())
}
