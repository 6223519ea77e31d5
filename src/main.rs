use anyhow::Context;
use clap::Parser;
use component_css_etl::core::etl::RunOutcome;
use component_css_etl::core::ConfigProvider;
use component_css_etl::utils::{logger, validation::Validate};
use component_css_etl::{CliConfig, CssPipeline, EtlEngine, EtlError, LocalStorage, TomlConfig};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting css-etl");
    if args.verbose {
        tracing::debug!("CLI config: {:?}", args);
    }

    let outcome = match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(path) {
                Ok(config) => {
                    tracing::info!("📦 Project: {}", config.project_name());
                    if let Some(description) = config.project_description() {
                        tracing::debug!("Project description: {}", description);
                    }
                    execute(config, args.dry_run).await
                }
                Err(e) => Err(anyhow::Error::new(e)
                    .context(format!("Failed to load config file '{}'", path))),
            }
        }
        None => execute(args.clone(), args.dry_run).await,
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("❌ css-etl failed: {:#}", e);

            // 根據錯誤嚴重程度決定退出碼
            match e.downcast_ref::<EtlError>() {
                Some(etl_error) => {
                    eprintln!("❌ {}", etl_error.user_friendly_message());
                    eprintln!("💡 Suggestion: {}", etl_error.recovery_suggestion());
                    ExitCode::from(etl_error.exit_code().max(1))
                }
                None => {
                    eprintln!("❌ {:#}", e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}

async fn execute<C: ConfigProvider + Validate>(config: C, dry_run: bool) -> anyhow::Result<()> {
    // 驗證配置
    config
        .validate()
        .context("Configuration validation failed")?;
    tracing::info!("✅ Configuration validated");

    display_config_summary(&config, dry_run);
    let top_properties = config.top_properties();

    let source = LocalStorage::new(config.components_path().to_string());
    let output = LocalStorage::new(config.output_path().to_string());
    let pipeline = CssPipeline::new(source, output, config);

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - No files will be written");
        return perform_dry_run(&pipeline).await;
    }

    let engine = EtlEngine::new(pipeline);
    let outcome = engine.run().await?;
    print_run_summary(&outcome, top_properties);

    Ok(())
}

fn display_config_summary<C: ConfigProvider>(config: &C, dry_run: bool) {
    println!("📋 Configuration Summary:");
    println!("  Components: {}", config.components_path());
    println!("  Extensions: {}", config.extensions().join(", "));
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output_formats().join(", "));
    println!("  Top properties: {}", config.top_properties());

    if dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

async fn perform_dry_run<C: ConfigProvider>(
    pipeline: &CssPipeline<LocalStorage, LocalStorage, C>,
) -> anyhow::Result<()> {
    let config = pipeline.config();
    let sources = pipeline.discover().await.with_context(|| {
        format!("Failed to scan components in '{}'", config.components_path())
    })?;

    println!("🔍 Dry Run Analysis:");
    println!("  {} component files would be processed", sources.len());
    for source in &sources {
        println!("  - {} ({})", source.base_name, source.relative_path);
    }

    println!();
    println!("💾 Files that would be written to {}:", config.output_path());
    if config.wants_format("json") {
        println!("  - {}", config.results_filename());
    }
    if config.wants_format("csv") {
        let names = config.csv_filenames();
        for name in [
            &names.property_matrix,
            &names.component_matrix,
            &names.summary,
            &names.detailed,
            &names.tokens,
        ] {
            println!("  - {}", name);
        }
    }
    if config.wants_format("markdown") {
        println!("  - {}", config.summary_filename());
    }

    println!();
    println!("✅ Dry run analysis complete.");
    Ok(())
}

fn print_run_summary(outcome: &RunOutcome, top_properties: usize) {
    let stats = &outcome.statistics;
    let metadata = &stats.metadata;

    println!("✅ CSS extraction completed successfully!");
    println!("📁 Output saved to: {}", outcome.output_path);
    println!("Total components: {}", metadata.total_components);
    println!("Components with styles: {}", metadata.components_with_styles);
    println!("Total CSS properties found: {}", metadata.total_css_properties);
    println!("CSS Custom Properties (tokens): {}", stats.custom_property_count);
    println!("Vendor Prefixed Properties: {}", stats.vendor_prefixed_count);

    if !stats.property_usage.is_empty() {
        println!();
        println!("Most common CSS properties found:");
        for (i, (property, count)) in stats.top_properties(top_properties).iter().enumerate() {
            println!("{:2}. {}: {} components", i + 1, property, count);
        }
    }
}
