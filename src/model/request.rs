use serde::Serialize;
use serde_json::{Map, Value};

use crate::model::mission::TimeFrame;
use crate::model::opt_param::ParamGroup;
use crate::model::prediction::PredictionWindow;

pub const RISK_MODEL: &str = "Multi10";
pub const TRADED_PRICE_TYPE: &str = "VWAPPriceNoLimit";
pub const DEPARTURE_PRED: &str = "pred";

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SampleScope {
    #[serde(rename = "ExchID")]
    pub exch_id: Vec<String>,
}

impl Default for SampleScope {
    /// 沪深两市
    fn default() -> Self {
        SampleScope {
            exch_id: vec!["SS".to_string(), "SZ".to_string()],
        }
    }
}

/// 预测值来源
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PredSource {
    pub table_name: String,
    pub st_name: String,
    pub weight: u32,
}

/// 新建回测任务请求
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct BacktestRequest {
    pub mission_name: String,
    pub time_frame: TimeFrame,
    pub sample_scope: SampleScope,
    pub risk_model: String,
    pub pred_source: Vec<PredSource>,
    pub traded_price_type: String,
    pub order_type: Map<String, Value>,
    pub groups: Vec<ParamGroup>,
    pub departure: String,
    /// 上传实际仓位或目标仓位文件时填写上传接口返回的 id
    #[serde(rename = "MissionID")]
    pub mission_id: String,
    #[serde(rename = "for_real")]
    pub for_real: bool,
}

impl BacktestRequest {
    pub fn new(
        mission_name: &str,
        window: &PredictionWindow,
        pred_table: &str,
        pred_version: &str,
        groups: Vec<ParamGroup>,
    ) -> Self {
        BacktestRequest {
            mission_name: mission_name.to_string(),
            time_frame: TimeFrame {
                date_start: window.start_date,
                date_end: window.end_date,
            },
            sample_scope: SampleScope::default(),
            risk_model: RISK_MODEL.to_string(),
            pred_source: vec![PredSource {
                table_name: pred_table.to_string(),
                st_name: pred_version.to_string(),
                weight: 1,
            }],
            traded_price_type: TRADED_PRICE_TYPE.to_string(),
            order_type: Map::new(),
            groups,
            departure: DEPARTURE_PRED.to_string(),
            mission_id: String::new(),
            for_real: false,
        }
    }
}
