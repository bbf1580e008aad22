use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// 日志过滤环境变量，默认 `info`。
pub const LOG_ENV: &str = "TRANSCRIBE_LOG";

/// 初始化全局 tracing 订阅者，日志写到 stderr，stdout 只留给结果。
/// `verbose` 为真时强制使用 `debug`。
pub fn init_tracing(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()?;
    Ok(())
}
