use analyst_eval::core::evaluator::evaluate_with_config;
use analyst_eval::core::ConfigProvider;
use analyst_eval::domain::ports::QuestionSource;
use analyst_eval::utils::{logger, validation::Validate};
use analyst_eval::TomlConfig;
use anyhow::Context;
use clap::Parser;

#[derive(Parser)]
#[command(name = "toml-eval")]
#[command(about = "Score a data analyst agent endpoint using a TOML configuration")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "eval-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the endpoint URL from config
    #[arg(long)]
    api_url: Option<String>,

    /// Show what would be sent without calling the endpoint
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    let verbose = args.verbose || config.verbose();
    if config.json_logs() {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("🚀 Starting TOML-based evaluation '{}'", config.name());
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(api_url) = args.api_url {
        tracing::info!("🔧 Endpoint overridden to: {}", api_url);
        config.endpoint.url = api_url;
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No request will be sent");
        perform_dry_run(&config).await?;
        return Ok(());
    }

    let report = evaluate_with_config(&config).await;
    tracing::info!(
        "Evaluation finished: success={}, score={}/{}",
        report.success,
        report.score,
        report.max_score
    );

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    tracing::info!("📋 Configuration Summary:");
    tracing::info!("  Endpoint: {}", config.api_url());
    tracing::info!("  Timeout: {:?}", config.timeout());
    tracing::info!("  Health check: {}", config.health_check());
    tracing::info!(
        "  Report: {}/{}",
        config.output_path(),
        config.report_file()
    );
}

async fn perform_dry_run(config: &TomlConfig) -> anyhow::Result<()> {
    let (name, text) = match config.question() {
        QuestionSource::File(path) => {
            let text = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read question file: {}", path))?;
            (path, text)
        }
        QuestionSource::Inline { name, text } => (name, text),
    };

    println!("📤 Would POST '{}' ({} bytes) to {}", name, text.len(), config.api_url());
    println!("📥 Report would be written to {}/{}", config.output_path(), config.report_file());
    Ok(())
}
