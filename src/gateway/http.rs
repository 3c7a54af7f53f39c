// ==========================================
// 母卷排产系统 - HTTP 求解网关
// ==========================================
// 职责: 以 reqwest 实现 SolveGateway 的 REST 契约
// 路径: POST /api/scheduling/solve
//       POST /api/scheduling/solve-async
//       GET  /api/scheduling/status/{jobId}
//       DELETE /api/scheduling/stop/{jobId}
// ==========================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::GatewayConfig;
use crate::domain::{SchedulingProblem, SchedulingSolution};
use crate::gateway::error::{GatewayError, GatewayResult};
use crate::gateway::{JobSubmitted, SolveGateway, SolverStatusResponse};

const API_BASE: &str = "/api/scheduling";

// ==========================================
// HttpSolveGateway
// ==========================================

/// HTTP 求解网关
///
/// 非成功状态码统一映射为 GatewayError::Http,消息取状态文本;
/// 连接/传输异常映射为 Transport,请求级超时映射为 Timeout
pub struct HttpSolveGateway {
    client: Client,
    base_url: String,
}

impl HttpSolveGateway {
    /// 按网关配置构建客户端 (连接超时/请求超时)
    pub fn new(config: &GatewayConfig) -> GatewayResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_BASE, path)
    }

    /// 非成功状态码统一转换为 Http 失败 (消息为状态文本)
    fn check_status(response: reqwest::Response) -> GatewayResult<reqwest::Response> {
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Http {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("未知状态")
                    .to_string(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl SolveGateway for HttpSolveGateway {
    async fn solve(&self, problem: &SchedulingProblem) -> GatewayResult<SchedulingSolution> {
        tracing::debug!(orders = problem.orders.len(), "发起同步求解请求");
        let response = self
            .client
            .post(self.url("/solve"))
            .json(problem)
            .send()
            .await?;
        let solution = Self::check_status(response)?
            .json::<SchedulingSolution>()
            .await?;
        Ok(solution)
    }

    async fn solve_async(&self, problem: &SchedulingProblem) -> GatewayResult<JobSubmitted> {
        tracing::debug!(orders = problem.orders.len(), "发起异步求解请求");
        let response = self
            .client
            .post(self.url("/solve-async"))
            .json(problem)
            .send()
            .await?;
        let submitted = Self::check_status(response)?
            .json::<JobSubmitted>()
            .await?;
        Ok(submitted)
    }

    async fn solver_status(&self, job_id: &str) -> GatewayResult<SolverStatusResponse> {
        let response = self
            .client
            .get(self.url(&format!("/status/{}", job_id)))
            .send()
            .await?;
        let status = Self::check_status(response)?
            .json::<SolverStatusResponse>()
            .await?;
        Ok(status)
    }

    async fn stop_solving(&self, job_id: &str) -> GatewayResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/stop/{}", job_id)))
            .send()
            .await?;
        // 确认响应体忽略
        Self::check_status(response)?;
        Ok(())
    }
}
