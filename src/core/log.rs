use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, registry, util::SubscriberInitExt, EnvFilter,
};

use crate::core::config::Config;

/// 初始化日志系统。返回的 guard 必须在进程生命周期内保持存活，
/// 否则文件日志中尚未落盘的内容会丢失。
pub fn init(config: &Config) -> WorkerGuard {
    // 1. 文件输出层：按天轮询，存放在配置的日志目录下
    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // 2. 格式化层（文件）- 不带颜色，包含详细代码位置
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_writer(non_blocking)
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)  // 请求可能落在不同工作线程上，保留线程ID便于排查并发问题
        .with_target(false);

    // 3. 格式化层（控制台）- 带颜色
    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true);

    // 4. 注册所有层
    registry()
        .with(EnvFilter::new(&config.rust_log))
        .with(stdout_layer)
        .with(file_layer)
        .init();

    guard
}
