// ==========================================
// 母卷排产系统 - 客户端配置层
// ==========================================
// 职责: 网关地址与各操作超时配置
// 来源优先级: 配置文件 < 环境变量
// ==========================================

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// 环境变量: 求解服务地址
pub const ENV_BASE_URL: &str = "SOLVER_BASE_URL";

// ==========================================
// 配置错误类型
// ==========================================
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("配置文件解析失败: {0}")]
    Parse(#[from] serde_json::Error),
}

// ==========================================
// GatewayConfig - 网关配置
// ==========================================
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// 求解服务基地址
    pub base_url: String,
    /// 连接超时(毫秒)
    pub connect_timeout_ms: u64,
    /// 单次请求超时(毫秒,传输层兜底)
    pub request_timeout_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            connect_timeout_ms: 10_000,
            request_timeout_ms: 300_000,
        }
    }
}

// ==========================================
// ControllerConfig - 作业控制器配置
// ==========================================
// 每个操作独立的截止时间: 同步求解可能长时间阻塞,
// 状态查询/终止必须快速失败
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// 同步求解超时(毫秒)
    pub solve_timeout_ms: u64,
    /// 异步提交超时(毫秒)
    pub submit_timeout_ms: u64,
    /// 状态查询超时(毫秒)
    pub poll_timeout_ms: u64,
    /// 终止请求超时(毫秒)
    pub stop_timeout_ms: u64,
    /// 演示驱动的轮询间隔(毫秒,节奏由调用方掌握)
    pub poll_interval_ms: u64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            solve_timeout_ms: 300_000,
            submit_timeout_ms: 30_000,
            poll_timeout_ms: 10_000,
            stop_timeout_ms: 10_000,
            poll_interval_ms: 2_000,
        }
    }
}

impl ControllerConfig {
    pub fn solve_timeout(&self) -> Duration {
        Duration::from_millis(self.solve_timeout_ms)
    }

    pub fn submit_timeout(&self) -> Duration {
        Duration::from_millis(self.submit_timeout_ms)
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }

    pub fn stop_timeout(&self) -> Duration {
        Duration::from_millis(self.stop_timeout_ms)
    }
}

// ==========================================
// ClientConfig - 客户端总配置
// ==========================================
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub gateway: GatewayConfig,
    pub controller: ControllerConfig,
}

impl ClientConfig {
    /// 从 JSON 配置文件加载
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let mut config: ClientConfig = serde_json::from_str(&raw)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// 默认配置 + 环境变量覆盖
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(base_url) = std::env::var(ENV_BASE_URL) {
            if !base_url.trim().is_empty() {
                self.gateway.base_url = base_url;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.gateway.base_url, "http://localhost:8080");
        assert_eq!(config.controller.poll_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        // 只覆盖部分字段,其余取默认值
        let config: ClientConfig = serde_json::from_str(
            r#"{"gateway": {"base_url": "http://solver:9000"}, "controller": {"poll_timeout_ms": 500}}"#,
        )
        .unwrap();
        assert_eq!(config.gateway.base_url, "http://solver:9000");
        assert_eq!(config.controller.poll_timeout_ms, 500);
        assert_eq!(config.controller.solve_timeout_ms, 300_000);
        assert_eq!(config.gateway.connect_timeout_ms, 10_000);
    }
}
