use std::env;
use std::str::FromStr;

use crate::error::MissionError;

/// 读取布尔型环境变量：支持 true/false/1/0（大小写不敏感）
pub fn env_is_true(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(v) => {
            let v = v.trim();
            v.eq_ignore_ascii_case("true") || v == "1"
        }
        Err(_) => default,
    }
}

/// 读取字符串环境变量，若不存在则返回默认值
pub fn env_or_default(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(v) => v,
        Err(_) => default.to_string(),
    }
}

/// 读取必填环境变量
pub fn env_required(key: &str) -> Result<String, MissionError> {
    env::var(key).map_err(|_| MissionError::Config(format!("缺少环境变量: {}", key)))
}

/// 解析可选环境变量，不存在时返回默认值，解析失败视为配置错误
pub fn env_parse_or<T: FromStr>(key: &str, default: T) -> Result<T, MissionError> {
    match env::var(key) {
        Ok(v) => v
            .trim()
            .parse::<T>()
            .map_err(|_| MissionError::Config(format!("环境变量 {} 格式错误: {}", key, v))),
        Err(_) => Ok(default),
    }
}
