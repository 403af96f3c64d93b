use std::sync::Arc;

use warmup_bot::channels::{Channel, CliChannel, TelegramChannel};
use warmup_bot::config::BotConfig;
use warmup_bot::dispatcher::{Dispatcher, UpdateHandler};
use warmup_bot::error::Error;
use warmup_bot::menu::MenuRouter;
use warmup_bot::notify::Notifier;
use warmup_bot::session::SessionStore;

/// Operator chat id used by the console channel, which prints instead of sending.
const CLI_OPERATOR_CHAT_ID: i64 = 0;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli_mode = std::env::args().skip(1).any(|a| a == "--cli");

    eprintln!("🤖 Warm-up bot v{}", env!("CARGO_PKG_VERSION"));

    let (channel, admin_chat_id) = if cli_mode {
        eprintln!("   Channel: cli (type button labels, /start to begin)\n");
        let cli: Arc<dyn Channel> = Arc::new(CliChannel::new());
        (cli, CLI_OPERATOR_CHAT_ID)
    } else {
        connect_telegram().await.unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            if let Error::Config(_) = e {
                eprintln!("  Set TELEGRAM_TOKEN and ADMIN_CHAT_ID in the environment or .env:");
                eprintln!("  TELEGRAM_TOKEN=...");
                eprintln!("  ADMIN_CHAT_ID=123456789");
            }
            std::process::exit(1);
        })
    };

    let sessions = Arc::new(SessionStore::new());
    let handler = UpdateHandler::new(
        Arc::clone(&channel),
        MenuRouter::new(sessions),
        Notifier::new(Arc::clone(&channel), admin_chat_id),
    );

    Dispatcher::new(channel, handler).run().await?;

    Ok(())
}

/// Load config and open the Telegram channel. Any error here is fatal.
async fn connect_telegram() -> warmup_bot::error::Result<(Arc<dyn Channel>, i64)> {
    let config = BotConfig::load()?;
    let telegram: Arc<dyn Channel> = Arc::new(TelegramChannel::connect(&config).await?);
    eprintln!("   Channel: telegram ({})", config.telegram_api_url);
    eprintln!("   Operator chat: {}\n", config.admin_chat_id);
    Ok((telegram, config.admin_chat_id))
}
