//! 优化参数组
//!
//! 服务端目录中的参数组经字段名规范化后原样提交，只补充名义本金与 `restrictSt`；
//! 目录之外的自定义参数组使用 [`CustomParamGroup`]

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::MissionError;
use crate::utils::field_name::normalize_fields;

/// 新建任务时按顺序引用的目录参数组
pub const CATALOG_GROUP_NAMES: [&str; 5] = [
    "AshareMF-On-AM-EE-CSI1000",
    "AshareMF-On-AM-EE-CSI500",
    "AshareMF-On-AM-LO",
    "AshareMF-On-Res-Index-T0",
    "AshareMF-On-Res-Index-T1",
];

/// 回测请求中的一个参数组
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ParamGroup {
    /// 目录参数组，规范化后的字段原样保留
    Catalog(Map<String, Value>),
    Custom(CustomParamGroup),
}

/// 自定义参数组
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomParamGroup {
    pub name: String,
    pub pre_pos: Option<Value>,
    pub order_type: Option<Value>,
    pub restrict_st: String,
    pub mv_lb: f64,
    pub mv_ub: f64,
    pub idst_lb: f64,
    pub idst_ub: f64,
    pub bench_weight: BTreeMap<String, f64>,
    pub amount: u64,
    pub rho: f64,
    pub trade_limit: f64,
    pub hedge_ratio: f64,
    pub shrinkage: f64,
    pub am: Vec<f64>,
    pub hm: Vec<f64>,
    pub max_stock_weight: Vec<f64>,
    pub q: Vec<f64>,
    pub p: Vec<f64>,
    pub b: Vec<f64>,
}

/// CSI1000 适度偏离组合，目录中没有对应参数组
pub fn csi1000_moderate_group(amount: u64) -> ParamGroup {
    ParamGroup::Custom(CustomParamGroup {
        name: "CSI1000-Moderate".to_string(),
        pre_pos: None,
        order_type: None,
        restrict_st: "AshareMF-On-AM-LO".to_string(),
        mv_lb: -0.5,
        mv_ub: 0.5,
        idst_lb: -0.05,
        idst_ub: 0.05,
        bench_weight: BTreeMap::from([("000852.SH".to_string(), 1.0)]),
        amount,
        rho: 0.0018,
        trade_limit: 0.07,
        hedge_ratio: 0.0,
        shrinkage: 0.3,
        am: vec![0.3],
        hm: vec![0.5],
        max_stock_weight: vec![0.007],
        q: vec![0.1],
        p: vec![0.5],
        b: vec![1.6],
    })
}

/// 服务端优化参数目录，按参数组名索引
#[derive(Debug, Clone, Default)]
pub struct ParamCatalog {
    entries: BTreeMap<String, Value>,
    amount: u64,
}

impl ParamCatalog {
    /// 由 `get_opt_params` 的原始数据构建目录，字段名在此规范化
    pub fn from_raw(raw: &[Value], amount: u64) -> Self {
        let mut entries = BTreeMap::new();
        for item in raw {
            match item.get("name").and_then(Value::as_str) {
                Some(name) => {
                    entries.insert(name.to_string(), normalize_fields(item));
                }
                None => debug!("忽略无名称的优化参数: {}", item),
            }
        }
        ParamCatalog { entries, amount }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 取出参数组，只补充名义本金与 `restrictSt`
    pub fn group(&self, name: &str) -> Result<ParamGroup, MissionError> {
        let value = self
            .entries
            .get(name)
            .ok_or_else(|| MissionError::missing_param_set(name))?;
        let mut fields = match value {
            Value::Object(map) => map.clone(),
            other => {
                return Err(MissionError::Config(format!(
                    "优化参数 `{}` 格式错误: {}",
                    name, other
                )))
            }
        };
        fields.insert("amount".to_string(), Value::from(self.amount));
        fields.insert("restrictSt".to_string(), Value::from(name));
        Ok(ParamGroup::Catalog(fields))
    }
}
