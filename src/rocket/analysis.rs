//! 组合分析接口

use anyhow::Result;
use serde::Serialize;

use crate::rocket::backtest::ValueResponse;
use crate::rocket::RocketClient;

impl RocketClient {
    /// 组合 Barra 分析
    pub async fn get_barra_analysis<B: Serialize + ?Sized>(
        &self,
        req_body: &B,
    ) -> Result<ValueResponse> {
        self.post_json("/rocket/api/analysis/barra", req_body).await
    }

    /// 日频盈亏数据（表单提交）
    pub async fn get_daily_pnl<B: Serialize + ?Sized>(
        &self,
        req_body: &B,
    ) -> Result<ValueResponse> {
        self.post_form("/rocket/api/analysis/dailypnl", req_body).await
    }

    /// 合约日频仓位数据（表单提交）
    pub async fn get_daily_position<B: Serialize + ?Sized>(
        &self,
        req_body: &B,
    ) -> Result<ValueResponse> {
        self.post_form("/rocket/api/analysis/position", req_body).await
    }

    /// 市值分组
    pub async fn get_fraction<B: Serialize + ?Sized>(
        &self,
        req_body: &B,
    ) -> Result<ValueResponse> {
        self.post_json("/rocket/api/analysis/fraction", req_body).await
    }

    /// 预测值分析
    pub async fn get_predict_analysis<B: Serialize + ?Sized>(
        &self,
        req_body: &B,
    ) -> Result<ValueResponse> {
        self.post_json("/rocket/api/analysis/predict", req_body).await
    }

    /// 指数日频收益率：沪深300、中证500、中证1000、中证2000、全A等权
    pub async fn get_bench_info(&self) -> Result<ValueResponse> {
        self.get("/rocket/api/benchinfo").await
    }

    /// 风险因子收益系数日频序列
    pub async fn get_barra_factor<B: Serialize + ?Sized>(
        &self,
        req_body: &B,
    ) -> Result<ValueResponse> {
        self.post_json("/rocket/api/analysis/barrafactor", req_body).await
    }

    /// 多组合分析
    pub async fn get_group_analysis<B: Serialize + ?Sized>(
        &self,
        req_body: &B,
    ) -> Result<ValueResponse> {
        self.post_json("/rocket/api/analysis/group", req_body).await
    }
}
