use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, FmtSubscriber, Layer, Registry};

use crate::app_config::env::{env_is_true, env_or_default};

// 设置日志
//
// 返回的 guard 需要在进程结束前一直持有，否则文件日志会丢失
pub fn setup_logging() -> anyhow::Result<Vec<WorkerGuard>> {
    let app_env = env_or_default("APP_ENV", "LOCAL");
    let mut guards = Vec::new();

    if app_env == "LOCAL" {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_ansi(true)
            .with_target(false)
            .with_file(true)
            .with_line_number(true)
            .with_level(true)
            .with_writer(std::io::stdout)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let info_file = RollingFileAppender::new(Rotation::DAILY, "log_files", "info.log");
        let error_file = RollingFileAppender::new(Rotation::DAILY, "log_files", "error.log");

        let (info_non_blocking, info_guard) = tracing_appender::non_blocking(info_file);
        let (error_non_blocking, error_guard) = tracing_appender::non_blocking(error_file);
        guards.push(info_guard);
        guards.push(error_guard);

        let subscriber = Registry::default()
            .with(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stdout)
                    .with_filter(EnvFilter::new("info")),
            )
            .with(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_file(true)
                    .with_line_number(true)
                    .with_level(true)
                    .with_writer(info_non_blocking)
                    .with_filter(EnvFilter::new("info")),
            )
            .with(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_file(true)
                    .with_line_number(true)
                    .with_level(true)
                    .with_writer(error_non_blocking)
                    .with_filter(EnvFilter::new("error")),
            );

        tracing::subscriber::set_global_default(subscriber)?;
    }

    // rbatis 通过 log 输出 SQL
    if env_is_true("DB_DEBUG", false) {
        fast_log::init(fast_log::Config::new().console().level(log::LevelFilter::Debug))
            .map_err(|e| anyhow::anyhow!("fast_log init error: {}", e))?;
    }
    Ok(guards)
}
