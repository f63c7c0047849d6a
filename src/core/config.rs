use config::{Config as ConfigLoader, ConfigError, Environment};
use dotenvy::dotenv;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port", alias = "SERVER_PORT")]
    pub server_port: u16,

    #[serde(default = "default_host", alias = "SERVER_HOST")]
    pub server_host: String,

    #[serde(default = "default_log", alias = "RUST_LOG")]
    pub rust_log: String,

    /// 滚动日志文件所在目录
    #[serde(default = "default_log_dir", alias = "LOG_DIR")]
    pub log_dir: String,
}

impl Config {
    /// 加载配置：
    /// - 支持 `.env`
    /// - 优先从环境变量加载，缺省项使用默认值
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        // 注意：Environment::default() 会把 `FOO__BAR=baz` 映射到 `foo.bar=baz`
        // 并且 try_parsing(true) 会把 "8080" 解析成数字等类型。
        ConfigLoader::builder()
            .add_source(Environment::default().try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// 服务监听地址，格式为 `host:port`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: default_port(),
            server_host: default_host(),
            rust_log: default_log(),
            log_dir: default_log_dir(),
        }
    }
}

// --- 默认值函数 ---
fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_log() -> String {
    "info".to_string()
}
fn default_log_dir() -> String {
    "logs".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_binds_all_interfaces() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.log_dir, "logs");
    }
}
