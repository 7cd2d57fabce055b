// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::trends::provider::{TrendsError, TrendsProvider};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Google Trends 客户端
///
/// 基于对 trends.google.com 私有接口的逆向工程实现：
/// autocomplete 提供相关关键词，explore 换取 TIMESERIES 部件的
/// 访问令牌，widgetdata/multiline 返回兴趣时间序列。
/// 所有响应都带有 `)]}'` XSSI 前缀，解析前先剥离。
///
/// 客户端实例显式构造并注入管线，不持有任何进程级全局状态。
pub struct GoogleTrendsClient {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTrendsClient {
    /// 创建新的趋势客户端
    ///
    /// # 参数
    ///
    /// * `base_url` - 趋势服务基础URL，测试中可指向本地桩服务
    /// * `timeout` - 单次请求超时时间
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
            .timeout(timeout)
            .cookie_store(true)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn get_payload(&self, url: &str) -> Result<Value, TrendsError> {
        debug!("Trends request: {}", url);
        let body = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TrendsError::Network(e.to_string()))?
            .text()
            .await
            .map_err(|e| TrendsError::Network(e.to_string()))?;

        parse_guarded_json(&body)
    }
}

/// 剥离 XSSI 守卫前缀并解析JSON
///
/// 响应形如 `)]}',\n{...}`，从第一个花括号开始才是有效负载。
pub fn parse_guarded_json(body: &str) -> Result<Value, TrendsError> {
    let start = body
        .find('{')
        .ok_or_else(|| TrendsError::Parse("no JSON object in response".to_string()))?;
    serde_json::from_str(&body[start..]).map_err(|e| TrendsError::Parse(e.to_string()))
}

/// 从 autocomplete 负载中提取相关关键词标题
pub fn extract_topic_titles(payload: &Value) -> Vec<String> {
    payload["default"]["topics"]
        .as_array()
        .map(|topics| {
            topics
                .iter()
                .filter_map(|topic| topic["title"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

/// 从 explore 负载中定位 TIMESERIES 部件的令牌和请求体
pub fn find_timeseries_widget(payload: &Value) -> Option<(String, Value)> {
    payload["widgets"].as_array()?.iter().find_map(|widget| {
        if widget["id"] == "TIMESERIES" {
            let token = widget["token"].as_str()?.to_string();
            Some((token, widget["request"].clone()))
        } else {
            None
        }
    })
}

/// 从 multiline 负载中提取时间序列数值
pub fn extract_timeline_values(payload: &Value) -> Vec<f64> {
    payload["default"]["timelineData"]
        .as_array()
        .map(|points| {
            points
                .iter()
                .filter_map(|point| point["value"].get(0).and_then(Value::as_f64))
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait]
impl TrendsProvider for GoogleTrendsClient {
    async fn related_keywords(&self, seed: &str) -> Result<Vec<String>, TrendsError> {
        let url = format!(
            "{}/trends/api/autocomplete/{}?hl=en-US&tz=0",
            self.base_url,
            urlencoding::encode(seed)
        );
        let payload = self.get_payload(&url).await?;
        Ok(extract_topic_titles(&payload))
    }

    async fn interest_over_time(&self, keyword: &str) -> Result<Vec<f64>, TrendsError> {
        let explore_req = serde_json::json!({
            "comparisonItem": [{ "keyword": keyword, "geo": "", "time": "today 12-m" }],
            "category": 0,
            "property": "",
        });
        let explore_url = format!(
            "{}/trends/api/explore?hl=en-US&tz=0&req={}",
            self.base_url,
            urlencoding::encode(&explore_req.to_string())
        );
        let explore = self.get_payload(&explore_url).await?;

        let (token, request) =
            find_timeseries_widget(&explore).ok_or(TrendsError::Empty)?;
        let multiline_url = format!(
            "{}/trends/api/widgetdata/multiline?hl=en-US&tz=0&req={}&token={}",
            self.base_url,
            urlencoding::encode(&request.to_string()),
            token
        );
        let payload = self.get_payload(&multiline_url).await?;

        let values = extract_timeline_values(&payload);
        if values.is_empty() {
            return Err(TrendsError::Empty);
        }
        Ok(values)
    }

    fn name(&self) -> &'static str {
        "google-trends"
    }
}
