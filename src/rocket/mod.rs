use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::MissionError;
use crate::model::{BacktestRequest, ExpandRequest};

pub mod analysis;
pub mod backtest;
pub mod rocket_client;
pub mod upload;

pub use rocket_client::RocketClient;

// 通用的响应结构体
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub code: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    pub data: T,
}

/// 运行、扩展回测任务返回的单条结果
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationItem {
    #[serde(
        rename = "missionId",
        default,
        deserialize_with = "deserialize_opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub mission_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

pub type MutationResponse = ApiResponse<Vec<MutationItem>>;

impl MutationResponse {
    /// 非零状态码转换为 [`MissionError::Service`]，错误信息取第一条结果的 detail
    pub fn into_result(self) -> Result<Vec<MutationItem>, MissionError> {
        if self.code == 0 {
            return Ok(self.data);
        }
        let detail = self
            .data
            .into_iter()
            .next()
            .and_then(|item| item.detail)
            .or(self.msg)
            .unwrap_or_else(|| "unknown error".to_string());
        Err(MissionError::Service {
            code: self.code,
            detail,
        })
    }
}

/// 回测服务中任务对账用到的接口
#[async_trait]
pub trait BacktestApi: Send + Sync {
    /// 实盘策略对应的优化参数
    async fn get_opt_params(&self) -> Result<ApiResponse<Vec<Value>>>;

    /// 回测任务列表，原样返回由调用方按需解码
    async fn get_mission_list(&self) -> Result<ApiResponse<Vec<Value>>>;

    async fn run_backtest(&self, req: &BacktestRequest) -> Result<MutationResponse>;

    async fn expand_backtest(&self, req: &ExpandRequest) -> Result<MutationResponse>;
}

fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "invalid missionId: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failed_response_carries_first_detail() {
        let rsp: MutationResponse = serde_json::from_value(json!({
            "code": 1,
            "data": [{"detail": "bad range"}, {"detail": "other"}]
        }))
        .unwrap();
        assert_eq!(
            rsp.into_result(),
            Err(MissionError::Service {
                code: 1,
                detail: "bad range".to_string()
            })
        );
    }

    #[test]
    fn test_failed_response_without_detail() {
        let rsp: MutationResponse =
            serde_json::from_value(json!({"code": 2, "msg": "forbidden", "data": []})).unwrap();
        assert!(matches!(
            rsp.into_result(),
            Err(MissionError::Service { detail, .. }) if detail == "forbidden"
        ));

        let rsp: MutationResponse = serde_json::from_value(json!({"code": 2, "data": []})).unwrap();
        assert!(matches!(
            rsp.into_result(),
            Err(MissionError::Service { detail, .. }) if detail == "unknown error"
        ));
    }

    #[test]
    fn test_success_response() {
        let rsp: MutationResponse =
            serde_json::from_value(json!({"code": 0, "data": [{"missionId": 77}]})).unwrap();
        let items = rsp.into_result().unwrap();
        assert_eq!(items[0].mission_id.as_deref(), Some("77"));
    }
}
