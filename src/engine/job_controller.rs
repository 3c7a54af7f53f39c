// ==========================================
// 母卷排产系统 - 求解作业控制器
// ==========================================
// 职责: 驱动 提交/轮询/终止 的作业生命周期状态机
// 状态机: NOT_SOLVING -> SOLVING -> NOT_SOLVING | TERMINATED
// 红线:
// 1. 同一控制器同时只跟踪一个作业,求解在途拒绝新提交
// 2. 轮询失败不得污染作业状态 (瞬时故障,下次轮询仍可成功)
// 3. 不含轮询调度 —— 轮询节奏由调用方掌握
// ==========================================

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::time::timeout;

use crate::config::ControllerConfig;
use crate::domain::{ProductionLine, SchedulingProblem, SchedulingSolution, SolverStatus};
use crate::gateway::{GatewayError, SolveGateway};

// ==========================================
// 控制器错误类型
// ==========================================
#[derive(Error, Debug)]
pub enum ControllerError {
    /// 并发提交保护: 已有求解在途时拒绝新提交,
    /// 避免静默覆盖作业ID导致远端旧作业成为孤儿
    #[error("已有求解任务进行中,请等待完成或先终止当前任务")]
    SolveInFlight,
}

// ==========================================
// JobController - 作业控制器
// ==========================================

/// 求解作业控制器
///
/// 网关失败不向外抛出: 捕获为当前错误值,调用方通过读取
/// 状态观察错误 (last_error)。控制器自身不做任何重试。
///
/// 并发模型: 所有操作取 &mut self,单个实例上的轮询天然串行,
/// 不存在旧响应覆盖新响应的乱序问题。
pub struct JobController {
    gateway: Arc<dyn SolveGateway>,
    config: ControllerConfig,

    // ===== 可观察状态 =====
    status: SolverStatus,
    solution: Option<SchedulingSolution>,
    job_id: Option<String>,
    last_error: Option<String>,
    loading: bool,
}

impl JobController {
    pub fn new(gateway: Arc<dyn SolveGateway>, config: ControllerConfig) -> Self {
        Self {
            gateway,
            config,
            status: SolverStatus::NotSolving,
            solution: None,
            job_id: None,
            last_error: None,
            loading: false,
        }
    }

    // ==========================================
    // 提交操作
    // ==========================================

    /// 同步求解: 阻塞等待求解完成
    ///
    /// 成功: 存储 Solution,回到 NOT_SOLVING
    /// 失败(含超时): 存储错误消息,回到 NOT_SOLVING
    /// 两种结局都会清除 loading
    pub async fn solve(&mut self, problem: SchedulingProblem) -> Result<(), ControllerError> {
        self.begin_submission()?;
        tracing::info!(orders = problem.orders.len(), "同步求解开始");

        let deadline = self.config.solve_timeout();
        let result = match timeout(deadline, self.gateway.solve(&problem)).await {
            Ok(result) => result,
            Err(_) => Err(deadline_exceeded(deadline)),
        };

        match result {
            Ok(solution) => {
                tracing::info!("同步求解完成");
                self.solution = Some(solution);
            }
            Err(err) => {
                tracing::warn!(error = %err, "同步求解失败");
                self.last_error = Some(err.to_string());
            }
        }
        self.status = SolverStatus::NotSolving;
        self.loading = false;
        Ok(())
    }

    /// 异步求解: 立即取得作业ID,结果经由 poll 获取
    ///
    /// 成功: 存储作业ID,保持 SOLVING/loading
    /// 失败: 存储错误消息,回到 NOT_SOLVING,清除 loading
    pub async fn solve_async(&mut self, problem: SchedulingProblem) -> Result<(), ControllerError> {
        self.begin_submission()?;
        tracing::info!(orders = problem.orders.len(), "异步求解提交");

        let deadline = self.config.submit_timeout();
        let result = match timeout(deadline, self.gateway.solve_async(&problem)).await {
            Ok(result) => result,
            Err(_) => Err(deadline_exceeded(deadline)),
        };

        match result {
            Ok(submitted) => {
                tracing::info!(job_id = %submitted.job_id, "异步求解已受理");
                self.job_id = Some(submitted.job_id);
            }
            Err(err) => {
                tracing::warn!(error = %err, "异步求解提交失败");
                self.last_error = Some(err.to_string());
                self.status = SolverStatus::NotSolving;
                self.loading = false;
            }
        }
        Ok(())
    }

    // ==========================================
    // 轮询与终止
    // ==========================================

    /// 查询当前作业状态 (无作业时静默跳过)
    ///
    /// 成功: 覆盖状态;响应携带 Solution 时覆盖结果;
    ///       报告终态 (NOT_SOLVING/TERMINATED) 时清除 loading,
    ///       使控制器可接受下一次提交
    /// 失败: 只记录错误 —— 状态、作业ID、loading 一律不动
    pub async fn poll(&mut self) {
        let job_id = match &self.job_id {
            Some(id) => id.clone(),
            None => return,
        };

        let deadline = self.config.poll_timeout();
        let result = match timeout(deadline, self.gateway.solver_status(&job_id)).await {
            Ok(result) => result,
            Err(_) => Err(deadline_exceeded(deadline)),
        };

        match result {
            Ok(response) => {
                self.status = response.status;
                if let Some(solution) = response.solution {
                    self.solution = Some(solution);
                }
                // TERMINATED 同样是终态: 不清除 loading 会把控制器
                // 永久卡在在途状态,后续提交全部被拒
                if self.status != SolverStatus::Solving {
                    tracing::info!(job_id = %job_id, status = %self.status, "异步求解收尾");
                    self.loading = false;
                }
            }
            Err(err) => {
                // 瞬时故障: 作业仍被跟踪,下次轮询可恢复
                tracing::warn!(job_id = %job_id, error = %err, "状态查询失败");
                self.last_error = Some(err.to_string());
            }
        }
    }

    /// 终止当前作业 (无作业时静默跳过,尽力而为)
    ///
    /// 成功: 无条件置 TERMINATED 并清除 loading,
    ///       与远端实际报告的状态无关
    /// 失败: 只记录错误,状态保持不变
    pub async fn stop(&mut self) {
        let job_id = match &self.job_id {
            Some(id) => id.clone(),
            None => return,
        };

        let deadline = self.config.stop_timeout();
        let result = match timeout(deadline, self.gateway.stop_solving(&job_id)).await {
            Ok(result) => result,
            Err(_) => Err(deadline_exceeded(deadline)),
        };

        match result {
            Ok(()) => {
                tracing::info!(job_id = %job_id, "终止请求已发送");
                self.status = SolverStatus::Terminated;
                self.loading = false;
            }
            Err(err) => {
                tracing::warn!(job_id = %job_id, error = %err, "终止请求失败");
                self.last_error = Some(err.to_string());
            }
        }
    }

    // ==========================================
    // 只读视图 (按需读取当前状态,永不缓存)
    // ==========================================

    pub fn status(&self) -> SolverStatus {
        self.status
    }

    pub fn job_id(&self) -> Option<&str> {
        self.job_id.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// 当前评分 (来自已存储 Solution)
    pub fn score(&self) -> Option<&serde_json::Value> {
        self.solution.as_ref().and_then(|s| s.score.as_ref())
    }

    /// 当前排产结果产线 (来自已存储 Solution,无结果时为空)
    pub fn solved_lines(&self) -> &[ProductionLine] {
        self.solution
            .as_ref()
            .map(|s| s.production_lines.as_slice())
            .unwrap_or(&[])
    }

    pub fn solution(&self) -> Option<&SchedulingSolution> {
        self.solution.as_ref()
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    /// 提交入口守卫: 求解在途拒绝;
    /// 通过后丢弃上一个作业的跟踪并进入 SOLVING
    fn begin_submission(&mut self) -> Result<(), ControllerError> {
        if self.loading {
            return Err(ControllerError::SolveInFlight);
        }
        // 新提交使旧作业ID作废 (远端旧作业不再被本控制器跟踪)
        self.job_id = None;
        self.last_error = None;
        self.loading = true;
        self.status = SolverStatus::Solving;
        Ok(())
    }
}

/// 超时映射为独立失败类别 (与一般网络失败区分)
fn deadline_exceeded(deadline: Duration) -> GatewayError {
    GatewayError::Timeout(format!("操作超过截止时间 {}ms", deadline.as_millis()))
}
