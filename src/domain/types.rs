// ==========================================
// 母卷排产系统 - 领域类型定义
// ==========================================
// 求解作业状态与远端求解服务契约一致
// 序列化格式: SCREAMING_SNAKE_CASE (与线上 JSON 一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 求解状态 (Solver Status)
// ==========================================
// 状态机: NOT_SOLVING -> SOLVING -> NOT_SOLVING | TERMINATED
// 新一次提交会将 TERMINATED 重置回 SOLVING
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolverStatus {
    NotSolving, // 空闲(初始态/求解结束)
    Solving,    // 求解中
    Terminated, // 已人工终止
}

impl SolverStatus {
    /// 判断是否处于空闲状态(可接受新提交)
    pub fn is_idle(&self) -> bool {
        *self != SolverStatus::Solving
    }
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverStatus::NotSolving => write!(f, "NOT_SOLVING"),
            SolverStatus::Solving => write!(f, "SOLVING"),
            SolverStatus::Terminated => write!(f, "TERMINATED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solver_status_serde_format() {
        // 线上格式必须为 SCREAMING_SNAKE_CASE
        assert_eq!(
            serde_json::to_string(&SolverStatus::NotSolving).unwrap(),
            "\"NOT_SOLVING\""
        );
        assert_eq!(
            serde_json::to_string(&SolverStatus::Solving).unwrap(),
            "\"SOLVING\""
        );
        assert_eq!(
            serde_json::to_string(&SolverStatus::Terminated).unwrap(),
            "\"TERMINATED\""
        );

        // 反序列化
        let status: SolverStatus = serde_json::from_str("\"TERMINATED\"").unwrap();
        assert_eq!(status, SolverStatus::Terminated);
    }

    #[test]
    fn test_solver_status_display() {
        assert_eq!(SolverStatus::NotSolving.to_string(), "NOT_SOLVING");
        assert_eq!(SolverStatus::Solving.to_string(), "SOLVING");
        assert_eq!(SolverStatus::Terminated.to_string(), "TERMINATED");
    }

    #[test]
    fn test_is_idle() {
        assert!(SolverStatus::NotSolving.is_idle());
        assert!(SolverStatus::Terminated.is_idle());
        assert!(!SolverStatus::Solving.is_idle());
    }
}
