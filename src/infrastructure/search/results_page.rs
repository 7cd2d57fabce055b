// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use scraper::{Html, Selector};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SerpError {
    #[error("Search page request failed: {0}")]
    Network(String),
}

/// 搜索结果页统计客户端
///
/// 抓取搜索结果页上的 `div#result-stats` 文案，从中提取结果总数，
/// 进而推导竞争度（以10为底的对数）和近似搜索量（千分之一）。
/// 两个指标各自独立抓取一次页面。
pub struct ResultsPageClient {
    client: reqwest::Client,
    base_url: String,
}

impl ResultsPageClient {
    /// 创建新的结果页客户端
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36")
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// 构造关键词的搜索URL
    pub fn search_url(&self, keyword: &str) -> String {
        format!("{}/search?q={}", self.base_url, keyword.replace(' ', "+"))
    }

    async fn result_count(&self, keyword: &str) -> Result<u64, SerpError> {
        let url = self.search_url(keyword);
        debug!("SERP request: {}", url);
        let body = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SerpError::Network(e.to_string()))?
            .text()
            .await
            .map_err(|e| SerpError::Network(e.to_string()))?;

        Ok(extract_result_count(&body).unwrap_or(0))
    }

    /// 竞争度：结果总数的常用对数，总数为0时返回0
    pub async fn competition(&self, keyword: &str) -> Result<f64, SerpError> {
        let count = self.result_count(keyword).await?;
        if count > 0 {
            Ok((count as f64).log10())
        } else {
            Ok(0.0)
        }
    }

    /// 近似搜索量：结果总数的千分之一（向下取整）
    pub async fn approximate_volume(&self, keyword: &str) -> Result<u64, SerpError> {
        let count = self.result_count(keyword).await?;
        Ok(count / 1000)
    }
}

/// 从结果页HTML中提取结果总数
///
/// 统计文案形如 "About 1,230,000 results"：取第二个空白分隔
/// 词元，只保留其中的数字字符。
pub fn extract_result_count(html: &str) -> Option<u64> {
    let document = Html::parse_document(html);
    let stats_selector = Selector::parse("div#result-stats").unwrap();

    let text = document
        .select(&stats_selector)
        .next()?
        .text()
        .collect::<String>();

    let token = text.split_whitespace().nth(1)?;
    let digits: String = token.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}
