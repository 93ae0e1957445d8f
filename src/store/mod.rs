use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

pub mod prediction_store;

pub use prediction_store::RbatisPredictionStore;

/// 预测值库
#[async_trait]
pub trait PredictionStore: Send + Sync {
    /// 指定预测值表与模型版本下所有不重复的日期，升序
    async fn prediction_dates(&self, table: &str, version: &str) -> Result<Vec<NaiveDate>>;
}
