// ==========================================
// 母卷排产系统 - 产线领域模型
// ==========================================
// orders 仅在 Solution 中回填已排订单序列,
// Problem 快照中恒为空列表
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::order::MotherRollOrder;
use crate::domain::wire_time;

// ==========================================
// ProductionLine - 产线
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionLine {
    pub id: String,        // 产线ID,如 "LINE_1"
    pub name: String,      // 显示名称,如 "一线"
    pub line_code: String, // 产线编码 (用于匹配兼容产线)
    #[serde(with = "wire_time::required")]
    pub available_from: NaiveDateTime, // 产线可用开始时间
    #[serde(default)]
    pub orders: Vec<MotherRollOrder>, // 已排订单序列 (仅 Solution 回填)
}

impl ProductionLine {
    pub fn new(id: &str, name: &str, line_code: &str, available_from: NaiveDateTime) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            line_code: line_code.to_string(),
            available_from,
            orders: Vec::new(),
        }
    }

    /// 去除排产结果的请求快照副本
    pub fn as_request_snapshot(&self) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            line_code: self.line_code.clone(),
            available_from: self.available_from,
            orders: Vec::new(),
        }
    }
}
