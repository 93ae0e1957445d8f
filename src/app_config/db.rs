use once_cell::sync::OnceCell;
use rbatis::RBatis;
use rbdc_mysql::MysqlDriver;
use rbs::Value;
use serde::Deserialize;
use tracing::info;

use crate::app_config::env::env_required;
use crate::error::MissionError;

static DB_CLIENT: OnceCell<RBatis> = OnceCell::new();

/// 预测值查询以参数绑定方式传入模型版本
const BOUND_PARAM_CHECK_SQL: &str = "SELECT ? AS echo";
const BOUND_PARAM_CHECK_VALUE: &str = "rocket_mission";

#[derive(Deserialize, Debug, Clone)]
struct EchoRow {
    echo: String,
}

/// 连接预测值库
///
/// 通过 MySQL 协议连接列式库，地址来自 `PRED_DB_URL`。
/// ClickHouse 的 MySQL 接口对预处理语句只部分支持，连接后先校验参数绑定可用
pub async fn init_db() -> anyhow::Result<&'static RBatis> {
    if let Some(rb) = DB_CLIENT.get() {
        return Ok(rb);
    }
    let url = env_required("PRED_DB_URL")?;
    let rb = RBatis::new();
    rb.link(MysqlDriver {}, &url).await?;

    let rows = rb
        .exec_decode::<Vec<EchoRow>>(
            BOUND_PARAM_CHECK_SQL,
            vec![Value::String(BOUND_PARAM_CHECK_VALUE.to_string())],
        )
        .await
        .map_err(|e| MissionError::Config(format!("预测值库不支持参数绑定查询: {}", e)))?;
    check_echo(&rows)?;
    info!("预测值库连接成功");

    Ok(DB_CLIENT.get_or_init(|| rb))
}

fn check_echo(rows: &[EchoRow]) -> Result<(), MissionError> {
    match rows.first() {
        Some(row) if row.echo == BOUND_PARAM_CHECK_VALUE => Ok(()),
        other => Err(MissionError::Config(format!(
            "预测值库参数绑定结果异常: {:?}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_echo() {
        let ok = EchoRow {
            echo: BOUND_PARAM_CHECK_VALUE.to_string(),
        };
        assert!(check_echo(&[ok]).is_ok());

        // 参数未被替换时原样返回占位符
        let unbound = EchoRow {
            echo: "?".to_string(),
        };
        assert!(matches!(check_echo(&[unbound]), Err(MissionError::Config(_))));
        assert!(check_echo(&[]).is_err());
    }
}
