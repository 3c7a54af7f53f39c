// ==========================================
// 母卷排产系统 - 订单登记层
// ==========================================
// 职责: 维护待排订单与产线的可变集合,分配全局唯一订单ID
// 红线: 订单ID在登记层内恒唯一; 兼容产线非空且只引用已知产线
// ==========================================

use chrono::{Local, NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::domain::{MotherRollOrder, OrderDraft, ProductionLine};

// ==========================================
// 登记层错误类型
// ==========================================
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("兼容产线列表不能为空")]
    EmptyCompatibleLines,

    #[error("兼容产线引用了未知产线: {line_code}")]
    UnknownLineCode { line_code: String },
}

/// Result 类型别名
pub type RegistryResult<T> = Result<T, RegistryError>;

// ==========================================
// OrderRegistry - 订单登记
// ==========================================

/// 订单登记
///
/// 职责:
/// 1. 产线集合维护
/// 2. 订单录入(分配单调递增ID)、移除、清空
/// 3. 演示数据装载
pub struct OrderRegistry {
    lines: Vec<ProductionLine>,
    orders: Vec<MotherRollOrder>,
    // 单调递增序号: 唯一性由递增保证,不依赖随机性
    next_order_seq: u64,
}

impl OrderRegistry {
    /// 以指定产线集合创建登记层
    pub fn new(lines: Vec<ProductionLine>) -> Self {
        Self {
            lines,
            orders: Vec::new(),
            next_order_seq: 1,
        }
    }

    /// 以默认两条产线创建登记层 (一线/二线,自当前时刻可用)
    pub fn with_default_lines() -> Self {
        Self::new(Self::default_lines())
    }

    /// 默认产线: LINE_1 一线、LINE_2 二线
    pub fn default_lines() -> Vec<ProductionLine> {
        let available_from = Local::now().naive_local();
        vec![
            ProductionLine::new("LINE_1", "一线", "LINE_1", available_from),
            ProductionLine::new("LINE_2", "二线", "LINE_2", available_from),
        ]
    }

    // ==========================================
    // 订单操作
    // ==========================================

    /// 录入订单: 校验兼容产线后分配新ID并追加
    ///
    /// # 返回
    /// - Ok(String): 分配的订单ID
    /// - Err(RegistryError): 兼容产线为空或引用未知产线
    pub fn add_order(&mut self, draft: OrderDraft) -> RegistryResult<String> {
        self.validate_compatible_lines(&draft.compatible_lines)?;

        let id = format!("ORDER_{:06}", self.next_order_seq);
        self.next_order_seq += 1;

        tracing::debug!(order_id = %id, product_code = %draft.product_code, "录入订单");
        self.orders.push(MotherRollOrder::from_draft(id.clone(), draft));
        Ok(id)
    }

    /// 移除订单 (不存在时静默跳过)
    pub fn remove_order(&mut self, id: &str) {
        self.orders.retain(|order| order.id != id);
    }

    /// 清空订单
    pub fn clear_orders(&mut self) {
        self.orders.clear();
    }

    // ==========================================
    // 查询接口
    // ==========================================

    pub fn lines(&self) -> &[ProductionLine] {
        &self.lines
    }

    pub fn orders(&self) -> &[MotherRollOrder] {
        &self.orders
    }

    /// 待排订单数量
    pub fn total_orders(&self) -> usize {
        self.orders.len()
    }

    // ==========================================
    // 演示数据
    // ==========================================

    /// 装载演示订单 (替换现有订单集合)
    pub fn load_demo_data(&mut self) {
        self.orders = demo_orders();
        tracing::info!(count = self.orders.len(), "已装载演示订单");
    }

    /// 测试辅助: 直接替换订单集合 (绕过ID分配,用于构造求解残留场景)
    #[cfg(test)]
    pub(crate) fn replace_orders_for_test(&mut self, orders: Vec<MotherRollOrder>) {
        self.orders = orders;
    }

    fn validate_compatible_lines(&self, compatible_lines: &[String]) -> RegistryResult<()> {
        if compatible_lines.is_empty() {
            return Err(RegistryError::EmptyCompatibleLines);
        }
        for line_code in compatible_lines {
            if !self.lines.iter().any(|line| &line.line_code == line_code) {
                return Err(RegistryError::UnknownLineCode {
                    line_code: line_code.clone(),
                });
            }
        }
        Ok(())
    }
}

// ==========================================
// 演示订单数据
// ==========================================

fn demo_time(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .expect("无效的演示日期")
        .and_hms_opt(8, 0, 0)
        .expect("无效的演示时间")
}

/// 10 条演示订单 (ID: DEMO_001..DEMO_010)
pub fn demo_orders() -> Vec<MotherRollOrder> {
    let both = || vec!["LINE_1".to_string(), "LINE_2".to_string()];
    let line2_only = || vec!["LINE_2".to_string()];

    let drafts = vec![
        // (型号, 配方, 厚度, 数量, 库存, 月出货, 期望开始日, 兼容产线, 时长)
        ("T10ESY", "F001", 188.0, 50, 120.0, 200.0, 1, both(), 24.0),
        ("T10ESY", "F001", 150.0, 40, 80.0, 180.0, 2, both(), 20.0),
        ("T9EST", "F002", 225.0, 60, 50.0, 150.0, 1, both(), 30.0),
        ("T9EST", "F002", 188.0, 35, 100.0, 120.0, 3, both(), 18.0),
        ("T24DJX", "F003", 100.0, 45, 30.0, 160.0, 1, both(), 22.0),
        ("T24DJY", "F003", 120.0, 30, 90.0, 100.0, 4, both(), 15.0),
        ("T29DJX", "F004", 150.0, 55, 40.0, 200.0, 2, both(), 28.0),
        ("T29DJY", "F004", 180.0, 25, 200.0, 80.0, 5, both(), 12.0),
        ("T29QDJY", "F005", 160.0, 38, 60.0, 140.0, 1, line2_only(), 20.0),
        ("T61ESYH", "F006", 200.0, 42, 70.0, 130.0, 3, both(), 22.0),
    ];

    drafts
        .into_iter()
        .enumerate()
        .map(
            |(
                i,
                (
                    product_code,
                    formula_code,
                    thickness,
                    quantity,
                    current_inventory,
                    monthly_shipment,
                    start_day,
                    compatible_lines,
                    production_duration_hours,
                ),
            )| {
                MotherRollOrder::from_draft(
                    format!("DEMO_{:03}", i + 1),
                    OrderDraft {
                        product_code: product_code.to_string(),
                        formula_code: formula_code.to_string(),
                        thickness,
                        quantity,
                        current_inventory,
                        monthly_shipment,
                        expected_start_time: demo_time(2026, 3, start_day),
                        compatible_lines,
                        production_duration_hours,
                    },
                )
            },
        )
        .collect()
}
