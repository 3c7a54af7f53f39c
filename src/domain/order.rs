// ==========================================
// 母卷排产系统 - 母卷订单领域模型
// ==========================================
// 静态属性由人工录入,求解器输出属性仅在 Solution 中回填
// 红线: Problem 快照中求解器输出属性必须全部为空
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::wire_time;

// ==========================================
// MotherRollOrder - 母卷订单
// ==========================================
// 线上格式: camelCase (与远端求解服务契约一致)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotherRollOrder {
    // ===== 静态属性 =====
    pub id: String,                 // 订单ID (登记层分配,全局唯一)
    pub product_code: String,       // 型号,如 "T10ESY"
    pub formula_code: String,       // 配方编码
    pub thickness: f64,             // 厚度 (用于轮转约束)
    pub quantity: u32,              // 数量
    pub current_inventory: f64,     // 现有库存量
    pub monthly_shipment: f64,      // 月均出货量
    #[serde(with = "wire_time::required")]
    pub expected_start_time: NaiveDateTime, // 期望开始时间
    pub compatible_lines: Vec<String>, // 兼容产线 lineCode 列表 (非空)
    pub production_duration_hours: f64, // 生产时长(小时)

    // ===== 求解器输出属性 (仅 Solution 回填, Problem 中必须为空) =====
    #[serde(default)]
    pub assigned_line: Option<String>, // 所在产线 lineCode
    #[serde(default)]
    pub sequence_index: Option<i32>, // 产线内位置索引 (0-based)
    #[serde(default)]
    pub previous_order: Option<String>, // 前一订单ID (队列首个为空)
    #[serde(default, with = "wire_time::optional")]
    pub start_time: Option<NaiveDateTime>, // 计算开始时间
    #[serde(default, with = "wire_time::optional")]
    pub end_time: Option<NaiveDateTime>, // 计算结束时间
}

impl MotherRollOrder {
    /// 由静态属性草稿构造订单(求解器输出属性全部为空)
    pub fn from_draft(id: String, draft: OrderDraft) -> Self {
        Self {
            id,
            product_code: draft.product_code,
            formula_code: draft.formula_code,
            thickness: draft.thickness,
            quantity: draft.quantity,
            current_inventory: draft.current_inventory,
            monthly_shipment: draft.monthly_shipment,
            expected_start_time: draft.expected_start_time,
            compatible_lines: draft.compatible_lines,
            production_duration_hours: draft.production_duration_hours,
            assigned_line: None,
            sequence_index: None,
            previous_order: None,
            start_time: None,
            end_time: None,
        }
    }

    /// 计算库存可供应天数 = 现有库存量 / 月均出货量 * 30
    ///
    /// 月均出货量为 0 时视为无限可供应
    pub fn inventory_supply_days(&self) -> f64 {
        if self.monthly_shipment <= 0.0 {
            return f64::INFINITY;
        }
        self.current_inventory / self.monthly_shipment * 30.0
    }
}

// ==========================================
// OrderDraft - 订单录入草稿
// ==========================================
// 登记层输入: 只含静态属性,ID 由登记层分配
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub product_code: String,
    pub formula_code: String,
    pub thickness: f64,
    pub quantity: u32,
    pub current_inventory: f64,
    pub monthly_shipment: f64,
    pub expected_start_time: NaiveDateTime,
    pub compatible_lines: Vec<String>,
    pub production_duration_hours: f64,
}
