// src/start.rs
use std::{error::Error, net::SocketAddr};
use tokio::net::TcpListener;
use tokio::signal;

use crate::{
    core::{config::Config, log},
    routes,
    state::AppState,
};

/// 启动并运行应用程序。
///
/// 这个函数执行以下步骤：
/// 1. 加载应用程序配置
/// 2. 初始化日志系统
/// 3. 创建内存存储与应用程序状态
/// 4. 配置并启动HTTP服务器
/// 5. 监听系统信号以实现优雅关闭
pub async fn run() -> Result<(), Box<dyn Error>> {
    // 第一步：加载应用程序配置。配置从环境变量（以及 .env）中读取。
    let config = Config::new()?;

    // 第二步：初始化日志系统。返回的 guard 用于在作用域结束时保持日志系统的活跃状态。
    let _guard = log::init(&config);
    tracing::info!("🔍 Config loaded successfully.");

    // 第三步：创建应用程序状态。存储只在进程生命周期内有效，不需要额外的清理。
    let state = AppState::in_memory();
    tracing::info!("✅ In-memory user store ready.");

    // 第四步：配置服务器监听地址。
    let addr: SocketAddr = config.bind_addr().parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("🚀 Server listening on http://{}", addr);

    let app = routes::create_router(state);

    // 第五步：启动HTTP服务器，并配置优雅关闭。
    // with_graceful_shutdown 允许在接收到关闭信号时完成正在处理的请求，然后再关闭服务器。
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// 监听系统关闭信号。支持 Ctrl+C（SIGINT）与 SIGTERM。
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("❌ Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("❌ Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    // 在非Unix系统（如Windows）上，使用一个永不完成的future作为占位符。
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("🛑 Signal received, starting graceful shutdown...");
}
