use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use reqwest::multipart::{Form, Part};

use crate::rocket::backtest::ValueResponse;
use crate::rocket::RocketClient;

/// 上传文件较大，单独设置超时
pub const UPLOAD_TIMEOUT: Duration = Duration::from_secs(10_000);

/// 待上传文件：表单字段名 + 本地路径
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub field: String,
    pub path: PathBuf,
}

impl RocketClient {
    /// 上传自定义文件（预测值、实际仓位、目标仓位）
    ///
    /// 返回的 id 可作为新建回测请求中的 `MissionID`
    pub async fn upload_custom_file(
        &self,
        fields: &[(String, String)],
        files: &[UploadFile],
    ) -> Result<ValueResponse> {
        let mut form = Form::new();
        for (key, value) in fields {
            form = form.text(key.clone(), value.clone());
        }
        for file in files {
            let bytes = tokio::fs::read(&file.path).await?;
            let file_name = file
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.field.clone());
            form = form.part(file.field.clone(), Part::bytes(bytes).file_name(file_name));
        }
        self.post_multipart("/rocket/api/upload/file", form, UPLOAD_TIMEOUT)
            .await
    }
}
