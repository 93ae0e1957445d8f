use chrono::NaiveDate;

use crate::app_config::env::{env_or_default, env_parse_or};
use crate::error::MissionError;

pub const MISSION_NAME: &str = "sw_production";
pub const PRED_TABLE: &str = "AshareSWPred";
pub const PRED_VERSION: &str = "SWorksVer1.1";
pub const PRED_FLOOR_DATE: &str = "2022-01-04";
pub const OPT_PARAM_AMOUNT: u64 = 10_000_000_000;

/// 回测任务对账配置
#[derive(Debug, Clone, PartialEq)]
pub struct MissionSettings {
    /// 对账使用的任务名
    pub mission_name: String,
    pub pred_table: String,
    pub pred_version: String,
    /// 回测起始日下限
    pub floor_date: NaiveDate,
    /// 优化参数组的名义本金
    pub amount: u64,
}

impl Default for MissionSettings {
    fn default() -> Self {
        MissionSettings {
            mission_name: MISSION_NAME.to_string(),
            pred_table: PRED_TABLE.to_string(),
            pred_version: PRED_VERSION.to_string(),
            floor_date: NaiveDate::from_ymd_opt(2022, 1, 4).unwrap_or_default(),
            amount: OPT_PARAM_AMOUNT,
        }
    }
}

impl MissionSettings {
    /// 读取环境变量覆盖默认值
    pub fn from_env() -> Result<Self, MissionError> {
        let floor_date = env_or_default("PRED_FLOOR_DATE", PRED_FLOOR_DATE);
        let floor_date = NaiveDate::parse_from_str(floor_date.trim(), "%Y-%m-%d").map_err(|_| {
            MissionError::Config(format!("环境变量 PRED_FLOOR_DATE 格式错误: {}", floor_date))
        })?;

        Ok(MissionSettings {
            mission_name: env_or_default("MISSION_NAME", MISSION_NAME),
            pred_table: env_or_default("PRED_TABLE", PRED_TABLE),
            pred_version: env_or_default("PRED_VERSION", PRED_VERSION),
            floor_date,
            amount: env_parse_or("OPT_PARAM_AMOUNT", OPT_PARAM_AMOUNT)?,
        })
    }
}
