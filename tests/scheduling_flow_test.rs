// ==========================================
// 求解作业生命周期测试
// ==========================================
// 测试范围:
// 1. 同步求解: 成功/失败都回到 NOT_SOLVING
// 2. 异步求解: 提交 -> 轮询 -> 收尾,loading 只经由轮询清除
// 3. 终止: 成功无条件 TERMINATED,失败不动状态
// 4. 轮询失败隔离: 瞬时故障不污染作业状态
// 5. 并发提交保护与超时失败类别
// ==========================================

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use mother_roll_aps::engine::build_problem;
use mother_roll_aps::gateway::{
    GatewayError, GatewayResult, JobSubmitted, SolveGateway, SolverStatusResponse,
};
use mother_roll_aps::{
    ControllerConfig, ControllerError, JobController, OrderRegistry, SchedulingProblem,
    SchedulingSolution, SolverStatus,
};

// ==========================================
// 测试辅助
// ==========================================

/// 可编程的模拟网关: 每个操作预先配置成功值或错误消息
#[derive(Default)]
struct MockGateway {
    solve_response: Mutex<Option<Result<SchedulingSolution, String>>>,
    submit_response: Mutex<Option<Result<String, String>>>,
    status_responses: Mutex<VecDeque<Result<SolverStatusResponse, String>>>,
    stop_response: Mutex<Option<Result<(), String>>>,
}

impl MockGateway {
    fn with_solve(result: Result<SchedulingSolution, &str>) -> Self {
        let gateway = Self::default();
        *gateway.solve_response.lock().unwrap() =
            Some(result.map_err(|m| m.to_string()));
        gateway
    }

    fn with_submit(result: Result<&str, &str>) -> Self {
        let gateway = Self::default();
        *gateway.submit_response.lock().unwrap() =
            Some(result.map(|id| id.to_string()).map_err(|m| m.to_string()));
        gateway
    }

    fn push_status(&self, result: Result<SolverStatusResponse, &str>) {
        self.status_responses
            .lock()
            .unwrap()
            .push_back(result.map_err(|m| m.to_string()));
    }

    fn set_stop(&self, result: Result<(), &str>) {
        *self.stop_response.lock().unwrap() = Some(result.map_err(|m| m.to_string()));
    }
}

#[async_trait]
impl SolveGateway for MockGateway {
    async fn solve(&self, _problem: &SchedulingProblem) -> GatewayResult<SchedulingSolution> {
        match self.solve_response.lock().unwrap().clone() {
            Some(Ok(solution)) => Ok(solution),
            Some(Err(message)) => Err(GatewayError::Transport(message)),
            None => Err(GatewayError::Transport("未配置同步求解响应".to_string())),
        }
    }

    async fn solve_async(&self, _problem: &SchedulingProblem) -> GatewayResult<JobSubmitted> {
        match self.submit_response.lock().unwrap().clone() {
            Some(Ok(job_id)) => Ok(JobSubmitted { job_id }),
            Some(Err(message)) => Err(GatewayError::Transport(message)),
            None => Err(GatewayError::Transport("未配置异步提交响应".to_string())),
        }
    }

    async fn solver_status(&self, _job_id: &str) -> GatewayResult<SolverStatusResponse> {
        match self.status_responses.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(GatewayError::Transport(message)),
            None => Err(GatewayError::Transport("未配置状态查询响应".to_string())),
        }
    }

    async fn stop_solving(&self, _job_id: &str) -> GatewayResult<()> {
        match self.stop_response.lock().unwrap().clone() {
            Some(Ok(())) => Ok(()),
            Some(Err(message)) => Err(GatewayError::Transport(message)),
            None => Err(GatewayError::Transport("未配置终止响应".to_string())),
        }
    }
}

/// 响应一直不回来的网关 (用于截止时间测试)
struct StalledGateway;

#[async_trait]
impl SolveGateway for StalledGateway {
    async fn solve(&self, _problem: &SchedulingProblem) -> GatewayResult<SchedulingSolution> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Err(GatewayError::Transport("不可达".to_string()))
    }

    // 提交本身即时受理,便于单测轮询/终止的截止时间路径
    async fn solve_async(&self, _problem: &SchedulingProblem) -> GatewayResult<JobSubmitted> {
        Ok(JobSubmitted {
            job_id: "J1".to_string(),
        })
    }

    async fn solver_status(&self, _job_id: &str) -> GatewayResult<SolverStatusResponse> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Err(GatewayError::Transport("不可达".to_string()))
    }

    async fn stop_solving(&self, _job_id: &str) -> GatewayResult<()> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Err(GatewayError::Transport("不可达".to_string()))
    }
}

fn demo_problem() -> SchedulingProblem {
    let mut registry = OrderRegistry::with_default_lines();
    registry.load_demo_data();
    build_problem(registry.lines(), registry.orders())
}

fn solution_with_score(score: i64) -> SchedulingSolution {
    SchedulingSolution {
        score: Some(json!(score)),
        production_lines: OrderRegistry::default_lines(),
        orders: Vec::new(),
    }
}

fn status_response(
    status: SolverStatus,
    solution: Option<SchedulingSolution>,
) -> SolverStatusResponse {
    SolverStatusResponse {
        job_id: Some("J1".to_string()),
        status,
        solution,
    }
}

fn controller(gateway: impl SolveGateway + 'static) -> JobController {
    JobController::new(Arc::new(gateway), ControllerConfig::default())
}

// ==========================================
// 同步求解场景
// ==========================================

#[tokio::test]
async fn test_sync_solve_success() {
    let gateway = MockGateway::with_solve(Ok(solution_with_score(42)));
    let mut ctl = controller(gateway);

    ctl.solve(demo_problem()).await.unwrap();

    assert_eq!(ctl.status(), SolverStatus::NotSolving);
    assert!(!ctl.is_loading());
    assert!(ctl.last_error().is_none());
    assert_eq!(ctl.score(), Some(&json!(42)));
    assert_eq!(ctl.solved_lines().len(), 2);
}

#[tokio::test]
async fn test_sync_solve_failure_returns_to_not_solving() {
    let gateway = MockGateway::with_solve(Err("connection refused"));
    let mut ctl = controller(gateway);

    ctl.solve(demo_problem()).await.unwrap();

    // 失败: 错误入库,状态回到 NOT_SOLVING,loading 清除
    assert_eq!(ctl.status(), SolverStatus::NotSolving);
    assert!(!ctl.is_loading());
    let err = ctl.last_error().expect("应记录错误");
    assert!(err.contains("connection refused"));
    assert!(ctl.score().is_none());
}

// ==========================================
// 异步求解场景
// ==========================================

#[tokio::test]
async fn test_async_submit_tracks_job_and_stays_solving() {
    let gateway = MockGateway::with_submit(Ok("J1"));
    let mut ctl = controller(gateway);

    ctl.solve_async(demo_problem()).await.unwrap();

    assert_eq!(ctl.job_id(), Some("J1"));
    assert_eq!(ctl.status(), SolverStatus::Solving);
    assert!(ctl.is_loading());
    assert!(ctl.last_error().is_none());
}

#[tokio::test]
async fn test_async_poll_to_completion() {
    let gateway = MockGateway::with_submit(Ok("J1"));
    // 第一次轮询: 仍在求解 (solution 为占位,不覆盖)
    gateway.push_status(Ok(status_response(SolverStatus::Solving, None)));
    // 第二次轮询: 求解完成,携带结果
    gateway.push_status(Ok(status_response(
        SolverStatus::NotSolving,
        Some(solution_with_score(7)),
    )));
    let mut ctl = controller(gateway);

    ctl.solve_async(demo_problem()).await.unwrap();

    ctl.poll().await;
    assert_eq!(ctl.status(), SolverStatus::Solving);
    assert!(ctl.is_loading(), "未完成前 loading 不得清除");
    assert!(ctl.score().is_none());

    ctl.poll().await;
    assert_eq!(ctl.status(), SolverStatus::NotSolving);
    assert!(!ctl.is_loading(), "报告 NOT_SOLVING 后 loading 必须清除");
    assert_eq!(ctl.score(), Some(&json!(7)));
}

#[tokio::test]
async fn test_poll_reporting_terminated_frees_controller() {
    let gateway = MockGateway::with_submit(Ok("J1"));
    // 远端作业被第三方终止: 轮询直接报告 TERMINATED
    gateway.push_status(Ok(status_response(SolverStatus::Terminated, None)));
    let mut ctl = controller(gateway);

    ctl.solve_async(demo_problem()).await.unwrap();

    ctl.poll().await;
    assert_eq!(ctl.status(), SolverStatus::Terminated);
    assert!(!ctl.is_loading(), "TERMINATED 是终态,loading 必须清除");

    // 终态后控制器必须能接受新提交,不得困死在在途状态
    ctl.solve_async(demo_problem()).await.unwrap();
    assert_eq!(ctl.status(), SolverStatus::Solving);
    assert_eq!(ctl.job_id(), Some("J1"));
}

#[tokio::test]
async fn test_async_submit_failure_reverts() {
    let gateway = MockGateway::with_submit(Err("502 Bad Gateway"));
    let mut ctl = controller(gateway);

    ctl.solve_async(demo_problem()).await.unwrap();

    assert!(ctl.job_id().is_none());
    assert_eq!(ctl.status(), SolverStatus::NotSolving);
    assert!(!ctl.is_loading());
    assert!(ctl.last_error().expect("应记录错误").contains("502"));
}

#[tokio::test]
async fn test_poll_overwrites_solution_with_latest() {
    let gateway = MockGateway::with_submit(Ok("J1"));
    gateway.push_status(Ok(status_response(
        SolverStatus::Solving,
        Some(solution_with_score(5)),
    )));
    gateway.push_status(Ok(status_response(
        SolverStatus::NotSolving,
        Some(solution_with_score(7)),
    )));
    let mut ctl = controller(gateway);

    ctl.solve_async(demo_problem()).await.unwrap();

    // 中间解也会被存储
    ctl.poll().await;
    assert_eq!(ctl.score(), Some(&json!(5)));
    assert!(ctl.is_loading());

    // 最终解覆盖中间解
    ctl.poll().await;
    assert_eq!(ctl.score(), Some(&json!(7)));
}

// ==========================================
// 轮询失败隔离
// ==========================================

#[tokio::test]
async fn test_poll_failure_leaves_job_state_untouched() {
    let gateway = MockGateway::with_submit(Ok("J1"));
    gateway.push_status(Err("timeout"));
    gateway.push_status(Ok(status_response(
        SolverStatus::NotSolving,
        Some(solution_with_score(7)),
    )));
    let mut ctl = controller(gateway);

    ctl.solve_async(demo_problem()).await.unwrap();

    // 轮询失败: 只记录错误,作业状态一律不动
    ctl.poll().await;
    assert_eq!(ctl.status(), SolverStatus::Solving);
    assert_eq!(ctl.job_id(), Some("J1"));
    assert!(ctl.is_loading());
    assert!(ctl.last_error().expect("应记录错误").contains("timeout"));

    // 后续轮询仍可成功收尾
    ctl.poll().await;
    assert_eq!(ctl.status(), SolverStatus::NotSolving);
    assert!(!ctl.is_loading());
    assert_eq!(ctl.score(), Some(&json!(7)));
}

#[tokio::test]
async fn test_poll_without_job_is_silent_noop() {
    let gateway = MockGateway::default();
    let mut ctl = controller(gateway);

    ctl.poll().await;

    assert_eq!(ctl.status(), SolverStatus::NotSolving);
    assert!(ctl.last_error().is_none(), "无作业轮询不算错误");
}

// ==========================================
// 终止场景
// ==========================================

#[tokio::test]
async fn test_stop_success_forces_terminated() {
    let gateway = MockGateway::with_submit(Ok("J1"));
    gateway.set_stop(Ok(()));
    let mut ctl = controller(gateway);

    ctl.solve_async(demo_problem()).await.unwrap();
    assert_eq!(ctl.status(), SolverStatus::Solving);

    // 确认响应体为空也无妨: 本地状态无条件置 TERMINATED
    ctl.stop().await;
    assert_eq!(ctl.status(), SolverStatus::Terminated);
    assert!(!ctl.is_loading());
}

#[tokio::test]
async fn test_stop_success_overrides_not_solving() {
    let gateway = MockGateway::with_submit(Ok("J1"));
    gateway.push_status(Ok(status_response(
        SolverStatus::NotSolving,
        Some(solution_with_score(7)),
    )));
    gateway.set_stop(Ok(()));
    let mut ctl = controller(gateway);

    ctl.solve_async(demo_problem()).await.unwrap();
    ctl.poll().await;
    assert_eq!(ctl.status(), SolverStatus::NotSolving);

    // 收尾后的终止同样生效: 成功即置 TERMINATED,与先前状态无关
    ctl.stop().await;
    assert_eq!(ctl.status(), SolverStatus::Terminated);
    assert!(!ctl.is_loading());
    assert_eq!(ctl.score(), Some(&json!(7)), "终止不清除已存储的结果");
}

#[tokio::test]
async fn test_stop_failure_leaves_state_unchanged() {
    let gateway = MockGateway::with_submit(Ok("J1"));
    gateway.set_stop(Err("500 Internal Server Error"));
    let mut ctl = controller(gateway);

    ctl.solve_async(demo_problem()).await.unwrap();
    ctl.stop().await;

    // 失败: 作业仍被跟踪,状态保持 SOLVING
    assert_eq!(ctl.status(), SolverStatus::Solving);
    assert_eq!(ctl.job_id(), Some("J1"));
    assert!(ctl.is_loading());
    assert!(ctl.last_error().expect("应记录错误").contains("500"));
}

#[tokio::test]
async fn test_stop_without_job_is_silent_noop() {
    let gateway = MockGateway::default();
    let mut ctl = controller(gateway);

    ctl.stop().await;

    assert_eq!(ctl.status(), SolverStatus::NotSolving);
    assert!(ctl.last_error().is_none(), "无作业终止不算错误");
}

// ==========================================
// 并发提交保护
// ==========================================

#[tokio::test]
async fn test_concurrent_submission_rejected() {
    let gateway = MockGateway::with_submit(Ok("J1"));
    let mut ctl = controller(gateway);

    ctl.solve_async(demo_problem()).await.unwrap();

    // 求解在途: 第二次提交必须显式拒绝,不得静默覆盖作业ID
    let second = ctl.solve_async(demo_problem()).await;
    assert!(matches!(second, Err(ControllerError::SolveInFlight)));
    let third = ctl.solve(demo_problem()).await;
    assert!(matches!(third, Err(ControllerError::SolveInFlight)));

    // 原作业跟踪不受影响
    assert_eq!(ctl.job_id(), Some("J1"));
    assert_eq!(ctl.status(), SolverStatus::Solving);
    assert!(ctl.is_loading());
}

#[tokio::test]
async fn test_new_submission_discards_previous_job() {
    let gateway = MockGateway::with_submit(Ok("J1"));
    gateway.set_stop(Ok(()));
    *gateway.solve_response.lock().unwrap() = Some(Ok(solution_with_score(42)));
    let mut ctl = controller(gateway);

    ctl.solve_async(demo_problem()).await.unwrap();
    ctl.stop().await;
    assert_eq!(ctl.job_id(), Some("J1"));

    // 终止后重新提交: 上一个作业ID被丢弃
    ctl.solve(demo_problem()).await.unwrap();
    assert!(ctl.job_id().is_none());
    assert_eq!(ctl.status(), SolverStatus::NotSolving);
    assert_eq!(ctl.score(), Some(&json!(42)));
}

// ==========================================
// 截止时间
// ==========================================

#[tokio::test]
async fn test_deadline_exceeded_is_distinct_failure() {
    let config = ControllerConfig {
        solve_timeout_ms: 50,
        ..ControllerConfig::default()
    };
    let mut ctl = JobController::new(Arc::new(StalledGateway), config);

    ctl.solve(demo_problem()).await.unwrap();

    // 超时走失败路径: 回到 NOT_SOLVING,错误类别为超时
    assert_eq!(ctl.status(), SolverStatus::NotSolving);
    assert!(!ctl.is_loading());
    let err = ctl.last_error().expect("应记录错误");
    assert!(err.contains("超时"), "超时必须是独立失败类别: {}", err);
}

#[tokio::test]
async fn test_poll_deadline_leaves_state_untouched() {
    let config = ControllerConfig {
        poll_timeout_ms: 50,
        ..ControllerConfig::default()
    };
    let mut ctl = JobController::new(Arc::new(StalledGateway), config);

    ctl.solve_async(demo_problem()).await.unwrap();
    assert_eq!(ctl.job_id(), Some("J1"));

    // 轮询超时: 与一般轮询失败同等对待,作业状态一律不动
    ctl.poll().await;
    assert_eq!(ctl.status(), SolverStatus::Solving);
    assert_eq!(ctl.job_id(), Some("J1"));
    assert!(ctl.is_loading());
    assert!(ctl.last_error().expect("应记录错误").contains("超时"));
}
