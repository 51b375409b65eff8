use buddy_up::core::workflow::{resolve_group_for_run, save_group_for_run};
use buddy_up::core::ConfigProvider;
use buddy_up::utils::error::ErrorSeverity;
use buddy_up::utils::{logger, validation::Validate};
use buddy_up::{
    BuddyEngine, CliConfig, LocalGroupStore, Result, RosterLoader, RunTarget, SlackClient,
    TomlConfig,
};
use clap::Parser;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting buddy-up CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(&config).await {
        tracing::error!(
            "❌ Buddy up failed: {} (Category: {:?}, Severity: {:?})",
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
}

async fn run(cli: &CliConfig) -> Result<()> {
    cli.validate()?;

    match &cli.config {
        Some(path) => {
            let file_config = TomlConfig::from_file(path)?;
            file_config.validate()?;
            tracing::debug!("Loaded settings from {}", path);

            let store_path = file_config.store_path().unwrap_or(&cli.store_path);
            let store = LocalGroupStore::new(store_path);
            execute(cli, &file_config, store).await
        }
        None => execute(cli, cli, LocalGroupStore::new(&cli.store_path)).await,
    }
}

async fn execute<C: ConfigProvider>(
    cli: &CliConfig,
    config: &C,
    store: LocalGroupStore,
) -> Result<()> {
    let group_id = match cli.target()? {
        RunTarget::Remember { run_id, channel } => {
            save_group_for_run(&store, &run_id, &channel).await?;
            println!("✅ Saved channel {} for workflow {}", channel, run_id);
            return Ok(());
        }
        RunTarget::Workflow { run_id } => resolve_group_for_run(&store, &run_id).await?,
        RunTarget::Channel(channel) => channel,
    };

    let slack = SlackClient::from_config(config)?;
    let engine = BuddyEngine::new(RosterLoader::from_config(slack.clone(), config), slack);

    let report = if cli.dry_run {
        engine.prepare(&group_id).await?
    } else {
        engine.run(&group_id).await?
    };

    if report.text.is_empty() {
        tracing::warn!("No human members found in {}", group_id);
    }

    if cli.dry_run {
        print!("{}", report.text);
    } else {
        println!(
            "✅ Posted {} pairs to {}{}",
            report.pairing.pairs.len(),
            group_id,
            if report.pairing.leftover.is_some() {
                " (one member unpaired)"
            } else {
                ""
            }
        );
    }

    Ok(())
}
