use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use rbatis::RBatis;
use rbs::Value;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::MissionError;
use crate::store::PredictionStore;
use crate::time_util::parse_date;

#[derive(Serialize, Deserialize, Debug, Clone)]
struct PredDateRow {
    date: String,
}

/// 基于 rbatis 的预测值库实现（ClickHouse MySQL 协议）
pub struct RbatisPredictionStore {
    db: &'static RBatis,
}

impl RbatisPredictionStore {
    pub fn new(db: &'static RBatis) -> Self {
        Self { db }
    }
}

/// 表名无法作为参数绑定，只允许字母、数字和下划线
fn check_table_name(table: &str) -> Result<(), MissionError> {
    if !table.is_empty() && table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(MissionError::Config(format!("非法的预测值表名: `{}`", table)))
    }
}

fn build_dates_query(table: &str) -> Result<String, MissionError> {
    check_table_name(table)?;
    Ok(format!(
        "SELECT DISTINCT toString(Date) AS date FROM {} WHERE Stname = ? ORDER BY date",
        table
    ))
}

#[async_trait]
impl PredictionStore for RbatisPredictionStore {
    async fn prediction_dates(&self, table: &str, version: &str) -> Result<Vec<NaiveDate>> {
        let sql = build_dates_query(table)?;
        debug!("query: {}", sql);
        let rows = self
            .db
            .exec_decode::<Vec<PredDateRow>>(&sql, vec![Value::String(version.to_string())])
            .await?;

        let mut dates = Vec::with_capacity(rows.len());
        for row in rows {
            dates.push(parse_date(&row.date)?);
        }
        Ok(dates)
    }
}
