use clap::Parser;
use phone_lookup_bot::core::BotSettings;
use phone_lookup_bot::utils::error::ErrorSeverity;
use phone_lookup_bot::utils::{logger, validation::Validate};
use phone_lookup_bot::{
    standard_registry, BotError, CliConfig, LogFormat, MenuController, Poller, SessionStore,
    TelegramClient, TomlConfig,
};
use std::sync::Arc;

async fn run<S: BotSettings + Validate>(settings: S) -> Result<(), BotError> {
    settings.validate()?;
    tracing::info!("✅ Configuration validated");

    let services = Arc::new(standard_registry(&settings)?);
    tracing::info!("🔧 Registered services: {}", services.labels().join(", "));

    let controller = MenuController::new(Arc::new(SessionStore::new()), services);
    let client = TelegramClient::new(
        settings.telegram_api_base(),
        settings.bot_token(),
        settings.poll_timeout(),
    )?;

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    Poller::new(client, controller, settings.poll_timeout())
        .run_until(shutdown)
        .await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }

    tracing::info!("Starting phone-lookup-bot");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = match cli.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(&path) {
                Ok(config) => run(config).await,
                Err(e) => Err(e),
            }
        }
        None => run(cli).await,
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Bot stopped: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    tracing::info!("👋 Bot stopped");
    Ok(())
}
