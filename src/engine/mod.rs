// ==========================================
// 母卷排产系统 - 引擎层
// ==========================================
// 职责: 求解请求组装与作业生命周期状态机
// 红线: 组装必须为纯函数; 状态机不含轮询调度,节奏由调用方掌握
// ==========================================

pub mod job_controller;
pub mod problem_builder;

// 重导出核心类型
pub use job_controller::{ControllerError, JobController};
pub use problem_builder::build_problem;
