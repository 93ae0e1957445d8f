pub mod mission;
pub mod opt_param;
pub mod prediction;
pub mod request;

pub use mission::{BacktestTask, ExpandRequest, TimeFrame};
pub use opt_param::{
    csi1000_moderate_group, CustomParamGroup, ParamCatalog, ParamGroup, CATALOG_GROUP_NAMES,
};
pub use prediction::PredictionWindow;
pub use request::BacktestRequest;
