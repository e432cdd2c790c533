use clap::Parser;
use three_braves::core::directory::directory_url;
use three_braves::utils::error::{ErrorSeverity, SearchError};
use three_braves::utils::{logger, validation::Validate};
use three_braves::{CliConfig, HttpFetcher, LocalStorage, PitcherSearchPipeline, SearchConfig, SearchEngine, SystemViewer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting three-braves");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 載入並驗證配置
    let config = match cli.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    if cli.dry_run {
        dry_run(&config);
        return Ok(());
    }

    if cli.monitor {
        tracing::info!("🔍 Run monitoring enabled");
    }

    let fetcher = match HttpFetcher::new(&config.source) {
        Ok(fetcher) => fetcher,
        Err(e) => exit_with(e),
    };
    let storage = LocalStorage::new(config.report.output_path.clone());
    let pipeline = PitcherSearchPipeline::new(fetcher, storage, SystemViewer, config);
    let engine = SearchEngine::new_with_monitoring(pipeline, cli.monitor);

    match engine.run().await {
        Ok(report_path) => {
            tracing::info!("✅ Search completed successfully!");
            tracing::info!("📁 Report saved to: {}", report_path);
            println!("✅ Search completed successfully!");
            println!("📁 Report saved to: {}", report_path);
        }
        Err(e) => exit_with(e),
    }

    Ok(())
}

/// 只列出會抓取的目錄頁，不發出任何請求
fn dry_run(config: &SearchConfig) {
    tracing::info!("🧪 Dry run: no pages will be fetched");
    tracing::info!("Resolved configuration: {:?}", config);
    for letter in config.letters() {
        tracing::info!("Would fetch {}", directory_url(&config.source.base_url, letter));
    }
    println!(
        "Dry run: {} directory pages, window ({} - {}), report formats {:?} in {}",
        config.search.letters.chars().count(),
        config.search.first_cutoff,
        config.search.last_cutoff,
        config.report.formats,
        config.report.output_path
    );
}

fn exit_with(e: SearchError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ Search failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
