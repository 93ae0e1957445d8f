//! 回测任务接口

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::model::{BacktestRequest, ExpandRequest};
use crate::rocket::{ApiResponse, BacktestApi, MutationResponse, RocketClient};

pub type ValueResponse = ApiResponse<Value>;

impl RocketClient {
    /// 获取基本参数
    pub async fn get_config(&self) -> Result<ValueResponse> {
        self.get("/rocket/api/backtest/config").await
    }

    /// 重运行回测任务
    pub async fn retry_backtest<B: Serialize + ?Sized>(
        &self,
        req_body: &B,
    ) -> Result<ValueResponse> {
        self.post_json("/rocket/api/backtest/retry", req_body).await
    }

    /// 删除回测任务
    pub async fn del_backtest<B: Serialize + ?Sized>(
        &self,
        req_body: &B,
    ) -> Result<ValueResponse> {
        self.post_json("/rocket/api/backtest/delete", req_body).await
    }

    /// 由 (id, name) 查询对应组合的具体属性
    pub async fn get_portfolio_details<B: Serialize + ?Sized>(
        &self,
        req_body: &B,
    ) -> Result<ValueResponse> {
        self.post_json("/rocket/api/backtest/portfolios", req_body).await
    }
}

#[async_trait]
impl BacktestApi for RocketClient {
    async fn get_opt_params(&self) -> Result<ApiResponse<Vec<Value>>> {
        self.get("/rocket/api/backtest/optparams").await
    }

    async fn get_mission_list(&self) -> Result<ApiResponse<Vec<Value>>> {
        self.get("/rocket/api/backtest/list").await
    }

    async fn run_backtest(&self, req: &BacktestRequest) -> Result<MutationResponse> {
        self.post_json("/rocket/api/backtest/run", req).await
    }

    async fn expand_backtest(&self, req: &ExpandRequest) -> Result<MutationResponse> {
        self.post_json("/rocket/api/backtest/expand", req).await
    }
}
