// ==========================================
// 母卷排产系统 - 线上时间格式
// ==========================================
// 远端求解服务使用 LocalDateTime 风格的 ISO 字符串,
// 前端录入为分钟精度 ("2026-03-01T08:00"),
// 服务端返回通常带秒 ("2026-03-01T08:00:00")。
// 两种精度都必须能解析。
// ==========================================

use chrono::NaiveDateTime;

const FORMAT_SECONDS: &str = "%Y-%m-%dT%H:%M:%S%.f";
const FORMAT_MINUTES: &str = "%Y-%m-%dT%H:%M";

/// 解析线上时间字符串(秒精度优先,分钟精度兜底)
pub fn parse(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, FORMAT_SECONDS)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, FORMAT_MINUTES))
}

/// 格式化为服务端使用的秒精度字符串
pub fn format(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S").to_string()
}

// ==========================================
// serde 适配: 必填时间字段
// ==========================================
pub mod required {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format(dt))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse(&raw).map_err(serde::de::Error::custom)
    }
}

// ==========================================
// serde 适配: 可空时间字段 (求解器输出字段)
// ==========================================
pub mod optional {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(dt: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match dt {
            Some(dt) => serializer.serialize_str(&super::format(dt)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            Some(raw) => super::parse(&raw)
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}
