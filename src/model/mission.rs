use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::time_util::{deserialize_date, serialize_date};

/// 回测区间
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeFrame {
    #[serde(
        rename = "DateStart",
        serialize_with = "serialize_date",
        deserialize_with = "deserialize_date"
    )]
    pub date_start: NaiveDate,
    #[serde(
        rename = "DateEnd",
        serialize_with = "serialize_date",
        deserialize_with = "deserialize_date"
    )]
    pub date_end: NaiveDate,
}

/// 回测列表中的任务
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BacktestTask {
    #[serde(rename = "MissionID", deserialize_with = "deserialize_mission_id")]
    pub mission_id: String,
    #[serde(rename = "MissionName")]
    pub mission_name: String,
    #[serde(rename = "TimeFrame")]
    pub time_frame: TimeFrame,
}

impl BacktestTask {
    /// 任务结束日早于目标结束日时可扩展
    pub fn is_expandable_to(&self, end_date: NaiveDate) -> bool {
        self.time_frame.date_end < end_date
    }
}

/// 扩展回测任务请求
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ExpandRequest {
    pub mission_id: String,
    #[serde(serialize_with = "serialize_date")]
    pub date_end: NaiveDate,
}

// MissionID 可能是字符串也可能是数字
fn deserialize_mission_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "invalid MissionID: {}",
            other
        ))),
    }
}
