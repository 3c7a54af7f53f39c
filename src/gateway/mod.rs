// ==========================================
// 母卷排产系统 - 求解网关层
// ==========================================
// 职责: 定义远端求解服务的四个逻辑操作契约
// 求解算法本身在远端运行,本层只做请求/响应搬运
// ==========================================

pub mod error;
pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{SchedulingProblem, SchedulingSolution, SolverStatus};

// 重导出核心类型
pub use error::{GatewayError, GatewayResult};
pub use http::HttpSolveGateway;

// ==========================================
// SolveGateway - 远端求解服务契约
// ==========================================

/// 远端求解服务的四个逻辑操作
///
/// | 操作 | 请求 | 成功响应 |
/// |---|---|---|
/// | 同步求解 | Problem | Solution |
/// | 异步求解 | Problem | jobId |
/// | 状态查询 | jobId | 状态 + 可选 Solution |
/// | 终止求解 | jobId | 确认 (响应体忽略) |
#[async_trait]
pub trait SolveGateway: Send + Sync {
    /// 同步求解: 阻塞等待求解完成后返回结果
    async fn solve(&self, problem: &SchedulingProblem) -> GatewayResult<SchedulingSolution>;

    /// 异步求解: 立即返回 jobId,后台持续求解
    async fn solve_async(&self, problem: &SchedulingProblem) -> GatewayResult<JobSubmitted>;

    /// 查询异步求解状态和结果
    async fn solver_status(&self, job_id: &str) -> GatewayResult<SolverStatusResponse>;

    /// 终止指定的异步求解作业 (尽力而为,响应体忽略)
    async fn stop_solving(&self, job_id: &str) -> GatewayResult<()>;
}

// ==========================================
// 线上响应类型
// ==========================================

/// 异步提交响应
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSubmitted {
    pub job_id: String,
}

/// 状态查询响应
///
/// 服务端在求解未完成时会把 solution 字段填成占位字符串
/// ("求解中..."),只有对象形态才视为有效 Solution
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolverStatusResponse {
    #[serde(default)]
    pub job_id: Option<String>,
    pub status: SolverStatus,
    #[serde(default, deserialize_with = "lenient_solution")]
    pub solution: Option<SchedulingSolution>,
}

/// 宽容解析 solution 字段: 对象 -> Solution,其余形态 -> None
fn lenient_solution<'de, D>(deserializer: D) -> Result<Option<SchedulingSolution>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        Some(value @ serde_json::Value::Object(_)) => serde_json::from_value(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}
