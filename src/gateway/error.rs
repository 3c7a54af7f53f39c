// ==========================================
// 母卷排产系统 - 求解网关错误类型
// ==========================================
// 职责: 统一四个远端操作的失败形态
// 红线: 超时必须与一般网络失败区分 (可解释性)
// ==========================================

use thiserror::Error;

/// 求解网关错误类型
///
/// 非成功的 HTTP 响应一律视为 Http 失败,消息为状态文本,
/// 不区分具体状态码
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("求解服务请求失败: HTTP {status} {message}")]
    Http { status: u16, message: String },

    #[error("求解服务网络错误: {0}")]
    Transport(String),

    #[error("求解服务请求超时: {0}")]
    Timeout(String),

    #[error("求解服务响应解析失败: {0}")]
    Decode(String),
}

impl GatewayError {
    /// 判断是否为超时失败
    pub fn is_timeout(&self) -> bool {
        matches!(self, GatewayError::Timeout(_))
    }
}

// ==========================================
// 从 reqwest::Error 转换
// ==========================================
impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Timeout(err.to_string())
        } else if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else {
            GatewayError::Transport(err.to_string())
        }
    }
}

/// Result 类型别名
pub type GatewayResult<T> = Result<T, GatewayError>;
