//! 日志系统配置模块
//! 支持结构化日志（JSON）与文本日志，输出到 stderr，stdout 留给程序输出

use anyhow::Context;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::config::LoggingConfig;
use crate::error::{WalletError, WalletResult};

/// 构造日志级别过滤器，RUST_LOG 优先于配置
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// 初始化日志系统
pub fn init_logging(config: &LoggingConfig) -> WalletResult<()> {
    let filter = build_filter(config);

    let result = if config.format == "json" {
        Registry::default()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        Registry::default()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_ansi(true))
            .try_init()
    };

    result
        .context("failed to install tracing subscriber")
        .map_err(WalletError::Config)
}
