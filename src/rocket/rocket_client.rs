use std::time::Duration;

use anyhow::{anyhow, Result};
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

/// 回测服务 HTTP 客户端
///
/// 登录后服务端通过 cookie 维持会话，客户端内部开启 cookie store
pub struct RocketClient {
    client: Client,
    base_url: String,
}

impl RocketClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder().cookie_store(true).build()?;
        Ok(RocketClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        let response = self
            .client
            .post(self.url("/user/login"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;
        response.error_for_status()?;
        info!("登录成功: `{}`", self.base_url);
        Ok(())
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let builder = self.client.request(Method::GET, self.url(path));
        self.send_request(path, builder).await
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.client.request(Method::POST, self.url(path)).json(body);
        self.send_request(path, builder).await
    }

    pub(crate) async fn post_form<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.client.request(Method::POST, self.url(path)).form(body);
        self.send_request(path, builder).await
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
        timeout: Duration,
    ) -> Result<T> {
        let builder = self
            .client
            .request(Method::POST, self.url(path))
            .multipart(form)
            .timeout(timeout);
        self.send_request(path, builder).await
    }

    async fn send_request<T: DeserializeOwned>(
        &self,
        path: &str,
        request_builder: RequestBuilder,
    ) -> Result<T> {
        let response = request_builder.send().await?;

        let status_code = response.status();
        let response_body = response.text().await?;
        debug!("path:{},rocket_response: {}", path, response_body);

        if status_code == StatusCode::OK {
            let result: T = serde_json::from_str(&response_body)?;
            Ok(result)
        } else {
            Err(anyhow!(
                "请求失败: path={}, status={}, body={}",
                path,
                status_code,
                response_body
            ))
        }
    }
}
