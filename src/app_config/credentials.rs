//! 登录凭证配置
//!
//! 配置文件不存在时生成模板并要求用户填写

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

use crate::error::MissionError;

pub const TEMPLATE_USER: &str = "<username>";
pub const TEMPLATE_PASSWORD: &str = "<password>";
pub const DEFAULT_BASE_URL: &str = "http://192.168.47.59";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Credentials {
    fn template() -> Self {
        Credentials {
            user: TEMPLATE_USER.to_string(),
            password: TEMPLATE_PASSWORD.to_string(),
            url: None,
        }
    }

    fn is_template(&self) -> bool {
        self.user == TEMPLATE_USER && self.password == TEMPLATE_PASSWORD
    }

    pub fn base_url(&self) -> &str {
        self.url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }
}

#[derive(Debug)]
pub enum CredentialsState {
    Ready(Credentials),
    /// 新建了模板文件
    Created(PathBuf),
    /// 模板尚未填写
    Unfilled(PathBuf),
}

impl CredentialsState {
    pub fn exit_code(&self) -> i32 {
        match self {
            CredentialsState::Ready(_) => 0,
            CredentialsState::Created(_) => 1,
            CredentialsState::Unfilled(_) => 2,
        }
    }
}

pub fn load_credentials(path: &Path) -> anyhow::Result<CredentialsState> {
    if !path.exists() {
        let mut buf = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        Credentials::template().serialize(&mut ser)?;
        fs::write(path, buf)?;
        return Ok(CredentialsState::Created(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    let credentials: Credentials = serde_json::from_str(&content).map_err(|e| {
        MissionError::Config(format!("配置文件 `{}` 解析失败: {}", path.display(), e))
    })?;
    if credentials.is_template() {
        return Ok(CredentialsState::Unfilled(path.to_path_buf()));
    }
    Ok(CredentialsState::Ready(credentials))
}
