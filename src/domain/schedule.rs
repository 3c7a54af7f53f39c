// ==========================================
// 母卷排产系统 - 求解请求/结果快照
// ==========================================
// Problem: 不可变请求快照,不含任何排产结果残留
// Solution: 求解结果,score 为求解器自定义的不透明值
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::order::MotherRollOrder;
use crate::domain::production_line::ProductionLine;

// ==========================================
// SchedulingProblem - 求解请求快照
// ==========================================
// 红线: 同一登记状态构建的 Problem 必须结构可复现,
// 与此前是否存在 Solution 残留无关
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingProblem {
    pub production_lines: Vec<ProductionLine>,
    pub orders: Vec<MotherRollOrder>,
}

// ==========================================
// SchedulingSolution - 求解结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulingSolution {
    /// 求解器评分,不透明值
    /// (远端可能返回数字,也可能返回 Timefold 风格的 "0hard/0medium/0soft")
    #[serde(default)]
    pub score: Option<serde_json::Value>,
    /// 已回填排产结果的产线 (orders 为有序已排订单)
    pub production_lines: Vec<ProductionLine>,
    /// 服务端同时回传的订单扁平列表
    #[serde(default)]
    pub orders: Vec<MotherRollOrder>,
}
