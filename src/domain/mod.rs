// ==========================================
// 母卷排产系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、求解请求/结果快照、线上格式辅助
// 红线: 不含网络访问逻辑,不含作业状态机逻辑
// ==========================================

pub mod order;
pub mod production_line;
pub mod schedule;
pub mod types;
pub mod wire_time;

// 重导出核心类型
pub use order::{MotherRollOrder, OrderDraft};
pub use production_line::ProductionLine;
pub use schedule::{SchedulingProblem, SchedulingSolution};
pub use types::SolverStatus;
