use analyst_eval::core::evaluator::evaluate_with_config;
use analyst_eval::utils::{logger, validation::Validate};
use analyst_eval::CliConfig;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting analyst-eval CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // 評估結果一律寫入報告，分數高低不影響結束碼
    let report = evaluate_with_config(&config).await;
    tracing::info!(
        "Evaluation finished: success={}, score={}/{}",
        report.success,
        report.score,
        report.max_score
    );

    Ok(())
}
