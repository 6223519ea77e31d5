use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "component_css_etl=debug,warn"
    } else {
        "component_css_etl=info,warn"
    }
}

/// 日誌輸出到 stderr，stdout 保留給執行摘要
pub fn init_cli_logger(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .without_time()
        .compact();

    // 重複初始化 (例如測試中) 時保留既有的 subscriber
    if tracing_subscriber::registry().with(filter).with(layer).try_init().is_err() {
        tracing::debug!("Logger already initialized");
    }
}
