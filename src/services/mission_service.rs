//! 回测任务对账服务
//!
//! 根据预测值库中的可用日期确定回测区间，
//! 已存在同名任务时扩展其结束日，否则构建并提交新的回测任务

use anyhow::Result;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::app_config::mission::MissionSettings;
use crate::error::MissionError;
use crate::model::{
    csi1000_moderate_group, BacktestRequest, BacktestTask, ExpandRequest, ParamCatalog,
    PredictionWindow, CATALOG_GROUP_NAMES,
};
use crate::rocket::{ApiResponse, BacktestApi};
use crate::store::PredictionStore;
use crate::time_util::format_date;

/// 对账结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// 已有任务；`expanded` 为本次扩展的任务 id，`up_to_date` 为无需扩展的任务数
    Expanded {
        expanded: Vec<String>,
        up_to_date: usize,
    },
    /// 新建任务
    Created { mission_id: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionReport {
    pub window: PredictionWindow,
    pub outcome: ReconcileOutcome,
}

pub struct MissionService {
    api: Box<dyn BacktestApi>,
    store: Box<dyn PredictionStore>,
    settings: MissionSettings,
}

impl MissionService {
    pub fn new(
        api: Box<dyn BacktestApi>,
        store: Box<dyn PredictionStore>,
        settings: MissionSettings,
    ) -> Self {
        Self {
            api,
            store,
            settings,
        }
    }

    pub fn settings(&self) -> &MissionSettings {
        &self.settings
    }

    /// 执行一次对账，任一步失败立即中止
    pub async fn reconcile(&self) -> Result<MissionReport> {
        let window = self.prediction_window().await?;

        let tasks = self.matching_tasks().await?;
        let outcome = if tasks.is_empty() {
            info!(
                "未找到任务名为 `{}` 的回测任务, 开始构建新任务",
                self.settings.mission_name
            );
            self.create_task(&window).await?
        } else {
            info!(
                "找到 {} 个任务名为 `{}` 的回测任务",
                tasks.len(),
                self.settings.mission_name
            );
            self.expand_tasks(&tasks, &window).await?
        };

        Ok(MissionReport { window, outcome })
    }

    /// 根据预测值日期计算回测区间
    pub async fn prediction_window(&self) -> Result<PredictionWindow> {
        let settings = &self.settings;
        let dates = self
            .store
            .prediction_dates(&settings.pred_table, &settings.pred_version)
            .await?;

        let window = PredictionWindow::from_dates(&dates, settings.floor_date).map_err(|found| {
            MissionError::Data {
                table: settings.pred_table.clone(),
                version: settings.pred_version.clone(),
                found,
            }
        })?;
        info!(
            "预测值表 `{}` 可用区间: {} ~ {}",
            settings.pred_table,
            format_date(&window.start_date),
            format_date(&window.end_date)
        );
        Ok(window)
    }

    /// 任务名匹配的已有任务
    pub async fn matching_tasks(&self) -> Result<Vec<BacktestTask>> {
        let rsp = self.api.get_mission_list().await?;
        let missions = read_data(rsp)?;

        let mut tasks = Vec::new();
        for mission in missions {
            let name = mission.get("MissionName").and_then(Value::as_str);
            if name == Some(self.settings.mission_name.as_str()) {
                tasks.push(serde_json::from_value::<BacktestTask>(mission)?);
            }
        }
        Ok(tasks)
    }

    /// 扩展结束日早于目标结束日的任务；任一任务失败立即中止，不再处理后续任务
    pub async fn expand_tasks(
        &self,
        tasks: &[BacktestTask],
        window: &PredictionWindow,
    ) -> Result<ReconcileOutcome> {
        let mut expanded = Vec::new();
        let mut up_to_date = 0;

        for task in tasks {
            if !task.is_expandable_to(window.end_date) {
                debug!(
                    "任务 `{}` 已覆盖至 {}, 无需扩展",
                    task.mission_id,
                    format_date(&task.time_frame.date_end)
                );
                up_to_date += 1;
                continue;
            }

            let req = ExpandRequest {
                mission_id: task.mission_id.clone(),
                date_end: window.end_date,
            };
            info!(
                "任务 `{}` 可扩展至 {}",
                req.mission_id,
                format_date(&req.date_end)
            );
            self.api.expand_backtest(&req).await?.into_result()?;
            info!(
                "已发送任务 `{}` 扩展请求, 结束日 {}",
                req.mission_id,
                format_date(&req.date_end)
            );
            expanded.push(req.mission_id);
        }

        Ok(ReconcileOutcome::Expanded {
            expanded,
            up_to_date,
        })
    }

    /// 由优化参数目录构建新建回测任务请求
    pub async fn build_request(&self, window: &PredictionWindow) -> Result<BacktestRequest> {
        let rsp = self.api.get_opt_params().await?;
        let catalog = ParamCatalog::from_raw(&read_data(rsp)?, self.settings.amount);
        debug!("优化参数目录共 {} 组", catalog.len());

        let mut groups = Vec::with_capacity(CATALOG_GROUP_NAMES.len() + 1);
        for name in CATALOG_GROUP_NAMES {
            groups.push(catalog.group(name)?);
        }
        groups.push(csi1000_moderate_group(self.settings.amount));

        Ok(BacktestRequest::new(
            &self.settings.mission_name,
            window,
            &self.settings.pred_table,
            &self.settings.pred_version,
            groups,
        ))
    }

    /// 构建并提交新的回测任务
    pub async fn create_task(&self, window: &PredictionWindow) -> Result<ReconcileOutcome> {
        let req = self.build_request(window).await?;
        debug!("回测任务配置: {}", serde_json::to_string(&req)?);

        let items = self.api.run_backtest(&req).await?.into_result()?;
        let mission_id = items.into_iter().next().and_then(|item| item.mission_id);
        match &mission_id {
            Some(id) => info!("已发送新建回测任务, mission id: `{}`", id),
            None => warn!("已发送新建回测任务, 但响应中没有 mission id"),
        }
        Ok(ReconcileOutcome::Created { mission_id })
    }
}

/// 读取类接口返回非零状态码同样视为服务错误
fn read_data<T>(rsp: ApiResponse<T>) -> Result<T, MissionError> {
    if rsp.code != 0 {
        return Err(MissionError::Service {
            code: rsp.code,
            detail: rsp.msg.unwrap_or_else(|| "unknown error".to_string()),
        });
    }
    Ok(rsp.data)
}
