// ==========================================
// 母卷排产系统 - 演示驱动入口
// ==========================================
// 用途: 装载演示订单,向远端求解服务提交并驱动轮询节奏
// 轮询节奏由本驱动(调用方)掌握,控制器只提供单次 poll 操作
// ==========================================

use std::sync::Arc;
use std::time::Duration;

use mother_roll_aps::engine::build_problem;
use mother_roll_aps::{
    ClientConfig, HttpSolveGateway, JobController, OrderRegistry, SolverStatus,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    mother_roll_aps::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 求解服务客户端", mother_roll_aps::APP_NAME);
    tracing::info!("系统版本: {}", mother_roll_aps::VERSION);
    tracing::info!("==================================================");

    // 配置: 默认值 + SOLVER_BASE_URL 环境变量覆盖
    let config = ClientConfig::from_env();
    tracing::info!("求解服务地址: {}", config.gateway.base_url);

    // 装载演示数据
    let mut registry = OrderRegistry::with_default_lines();
    registry.load_demo_data();
    let problem = build_problem(registry.lines(), registry.orders());
    tracing::info!(
        "待排订单: {} 条, 产线: {} 条",
        registry.total_orders(),
        registry.lines().len()
    );

    let gateway = Arc::new(HttpSolveGateway::new(&config.gateway)?);
    let mut controller = JobController::new(gateway, config.controller.clone());

    // 命令行参数: sync 走同步求解,默认异步 + 轮询
    let mode = std::env::args().nth(1).unwrap_or_else(|| "async".to_string());

    match mode.as_str() {
        "sync" => {
            controller.solve(problem).await?;
        }
        _ => {
            controller.solve_async(problem).await?;

            let poll_interval = Duration::from_millis(config.controller.poll_interval_ms);
            while controller.is_loading() {
                tokio::time::sleep(poll_interval).await;
                controller.poll().await;
                tracing::info!(
                    "作业状态: {} (job_id={})",
                    controller.status(),
                    controller.job_id().unwrap_or("-")
                );

                if controller.status() == SolverStatus::Terminated {
                    break;
                }
            }
        }
    }

    // 结果汇报
    if let Some(err) = controller.last_error() {
        tracing::warn!("最近错误: {}", err);
    }
    match controller.score() {
        Some(score) => tracing::info!("求解评分: {}", score),
        None => tracing::info!("未获得求解结果"),
    }
    for line in controller.solved_lines() {
        tracing::info!(
            "产线 {} ({}): 排产 {} 条订单",
            line.line_code,
            line.name,
            line.orders.len()
        );
        for order in &line.orders {
            tracing::info!(
                "  [{}] {} 厚度={} 开始={:?} 结束={:?}",
                order.sequence_index.map_or("-".to_string(), |i| i.to_string()),
                order.id,
                order.thickness,
                order.start_time,
                order.end_time
            );
        }
    }

    Ok(())
}
