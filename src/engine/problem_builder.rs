// ==========================================
// 母卷排产系统 - 求解请求组装
// ==========================================
// 职责: 由登记层快照组装不可变 Problem
// 红线: 求解器输出属性必须显式清空 —— 上一轮 Solution
//       回填的残留不得进入新请求,保证幂等重提交
// ==========================================

use crate::domain::{MotherRollOrder, ProductionLine, SchedulingProblem};

/// 组装求解请求快照 (纯函数,无副作用)
///
/// - 产线: 只保留 id/name/lineCode/availableFrom,orders 恒为空
///   (排产结果是求解输出,不是请求输入)
/// - 订单: 保留全部静态属性,五个求解器输出属性无条件置空
///
/// 同一登记状态下重复调用,序列化结果字节级一致
pub fn build_problem(
    lines: &[ProductionLine],
    orders: &[MotherRollOrder],
) -> SchedulingProblem {
    let production_lines = lines
        .iter()
        .map(ProductionLine::as_request_snapshot)
        .collect();

    let orders = orders
        .iter()
        .map(|order| MotherRollOrder {
            id: order.id.clone(),
            product_code: order.product_code.clone(),
            formula_code: order.formula_code.clone(),
            thickness: order.thickness,
            quantity: order.quantity,
            current_inventory: order.current_inventory,
            monthly_shipment: order.monthly_shipment,
            expected_start_time: order.expected_start_time,
            compatible_lines: order.compatible_lines.clone(),
            production_duration_hours: order.production_duration_hours,
            // 无条件清空: 即使内存中的订单带有上一轮求解残留
            assigned_line: None,
            sequence_index: None,
            previous_order: None,
            start_time: None,
            end_time: None,
        })
        .collect();

    SchedulingProblem {
        production_lines,
        orders,
    }
}
