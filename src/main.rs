//! One-shot emitter.
//!
//! ```text
//! live-bridge <content_id> <status> <event_name> [json_payload]
//! ```
//!
//! Loads configuration from the environment, connects to the broker,
//! publishes one event to the content item's room and exits. A missing
//! broker is not an error: the operator notice is printed to stderr and
//! the process still exits successfully.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use live_bridge::adapters::{EnglishLocalizer, InMemoryNoticeBoard, RedisConnector, StaticContentContext};
use live_bridge::application::{BridgeDependencies, EmitOutcome, LiveBridge};
use live_bridge::config::BridgeConfig;
use live_bridge::domain::broadcast::ContentId;

/// Publish one live event to a content item's room.
#[derive(Debug, Parser)]
#[command(name = "live-bridge", version, about)]
struct Cli {
    /// Content item whose room receives the event
    content_id: u64,

    /// Publication status of the content item (draft, publish, ...)
    status: String,

    /// Event name, e.g. new_entry
    event_name: String,

    /// Event payload as JSON; defaults to {}
    #[arg(value_parser = parse_payload)]
    json_payload: Option<Value>,
}

impl Cli {
    fn payload(&self) -> Value {
        self.json_payload
            .clone()
            .unwrap_or_else(|| Value::Object(Default::default()))
    }
}

fn parse_payload(raw: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(raw)
}

#[tokio::main]
async fn main() -> ExitCode {
    // Usage errors exit with status 2
    let cli = Cli::parse();

    let config = match BridgeConfig::load_validated() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let content_id = ContentId::new(cli.content_id);
    let deps = BridgeDependencies {
        connector: Arc::new(RedisConnector::new()),
        content: Arc::new(StaticContentContext::single(content_id, cli.status.as_str())),
        notices: Arc::new(InMemoryNoticeBoard::new()),
        localizer: Arc::new(EnglishLocalizer),
    };
    let bridge = match LiveBridge::from_config(&config, deps) {
        Ok(bridge) => bridge,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return ExitCode::from(2);
        }
    };

    let outcome = bridge.emit(&cli.event_name, &cli.payload()).await;
    for notice in bridge.pending_notices() {
        eprintln!("{}", notice.message);
    }

    match outcome {
        EmitOutcome::Published { room } => {
            tracing::info!(event = %cli.event_name, room = %room, "Event published");
        }
        other => tracing::info!(outcome = ?other, "Event not published"),
    }

    ExitCode::SUCCESS
}
