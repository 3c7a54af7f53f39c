// ==========================================
// 母卷排产系统 - 求解客户端核心库
// ==========================================
// 系统定位: 远端求解服务的客户端编排层
// 求解算法在远端运行,本库只负责 问题组装 + 作业生命周期
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 登记层 - 订单与产线集合
pub mod registry;

// 引擎层 - 问题组装与作业状态机
pub mod engine;

// 网关层 - 远端求解服务契约
pub mod gateway;

// 配置层 - 地址与超时
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    MotherRollOrder, OrderDraft, ProductionLine, SchedulingProblem, SchedulingSolution,
    SolverStatus,
};

// 登记层
pub use registry::{OrderRegistry, RegistryError};

// 引擎
pub use engine::{build_problem, ControllerError, JobController};

// 网关
pub use gateway::{GatewayError, HttpSolveGateway, JobSubmitted, SolveGateway, SolverStatusResponse};

// 配置
pub use config::{ClientConfig, ControllerConfig, GatewayConfig};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "母卷排产系统";
