use thiserror::Error;

/// 任务对账错误
///
/// 传输层、鉴权、数据库等错误不在此处包装，直接通过 `anyhow` 原样向上传递
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MissionError {
    /// 预测值日期不足，无法计算回测区间
    #[error("预测值数据不足: 表 `{table}` 版本 `{version}` 仅找到 {found} 个日期, 至少需要 2 个")]
    Data {
        table: String,
        version: String,
        found: usize,
    },

    /// 配置错误（包括优化参数目录缺失）
    #[error("配置错误: {0}")]
    Config(String),

    /// 回测服务返回非零状态码
    #[error("回测服务错误: {detail}")]
    Service { code: i64, detail: String },
}

impl MissionError {
    pub fn missing_param_set(name: &str) -> Self {
        MissionError::Config(format!("优化参数 `{}` 不存在", name))
    }

    /// 进程退出码
    pub fn exit_code(&self) -> i32 {
        match self {
            MissionError::Config(_) => 3,
            MissionError::Data { .. } => 4,
            MissionError::Service { .. } => 5,
        }
    }
}

/// 非任务错误（网络、鉴权、数据库）对应的退出码
pub const UNKNOWN_ERROR_EXIT_CODE: i32 = 10;

/// 由 `anyhow::Error` 推断退出码
pub fn exit_code_of(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<MissionError>() {
        Some(mission_err) => mission_err.exit_code(),
        None => UNKNOWN_ERROR_EXIT_CODE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_of() {
        let err: anyhow::Error = MissionError::Service {
            code: 1,
            detail: "bad range".to_string(),
        }
        .into();
        assert_eq!(exit_code_of(&err), 5);
        assert!(err.to_string().contains("bad range"));

        let err = anyhow::anyhow!("connection refused");
        assert_eq!(exit_code_of(&err), UNKNOWN_ERROR_EXIT_CODE);
    }

    #[test]
    fn test_missing_param_set_message() {
        let err = MissionError::missing_param_set("AshareMF-On-AM-LO");
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("AshareMF-On-AM-LO"));
    }
}
