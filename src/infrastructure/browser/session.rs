// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::search::competitors::{CompetitorError, CompetitorSource};
use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::warn;

/// 作用域内的浏览器会话
///
/// 每次调用独立启动一个无头Chrome进程，用完即关。进程是本系统中
/// 唯一带生命周期风险的资源，获取-使用-释放三段必须配对：
/// 调用方先把使用结果收下，再无条件执行`shutdown`，保证包括出错
/// 在内的每条退出路径都会回收浏览器进程。
pub struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

impl BrowserSession {
    /// 启动无头浏览器
    pub async fn launch(timeout: Duration) -> Result<Self, CompetitorError> {
        let config = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .request_timeout(timeout)
            .build()
            .map_err(CompetitorError::Browser)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| CompetitorError::Browser(e.to_string()))?;

        // Drain CDP events until the browser goes away
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            browser,
            handler_task,
        })
    }

    /// 打开页面并按文档顺序收集非空的h3标题文本
    pub async fn collect_heading_texts(
        &self,
        url: &str,
        limit: usize,
    ) -> Result<Vec<String>, CompetitorError> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| CompetitorError::Browser(e.to_string()))?;

        page.set_user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36")
            .await
            .map_err(|e| CompetitorError::Browser(e.to_string()))?;

        page.goto(url)
            .await
            .map_err(|e| CompetitorError::Browser(e.to_string()))?;

        let elements = page
            .find_elements("h3")
            .await
            .map_err(|e| CompetitorError::Browser(e.to_string()))?;

        let mut texts = Vec::new();
        for element in elements {
            if texts.len() >= limit {
                break;
            }
            if let Ok(Some(text)) = element.inner_text().await {
                let text = text.trim();
                if !text.is_empty() {
                    texts.push(text.to_string());
                }
            }
        }

        Ok(texts)
    }

    /// 关闭浏览器并回收进程
    pub async fn shutdown(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("Browser close failed: {}", e);
        }
        let _ = self.browser.wait().await;
        self.handler_task.abort();
    }
}

/// 基于无头浏览器的竞争对手抓取器
///
/// 对搜索结果页执行一次浏览器会话，取前几个h3结果标题。
pub struct HeadlessCompetitorScraper {
    search_base_url: String,
    timeout: Duration,
}

impl HeadlessCompetitorScraper {
    pub fn new(search_base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            search_base_url: search_base_url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl CompetitorSource for HeadlessCompetitorScraper {
    async fn top_competitors(
        &self,
        seed: &str,
        slots: usize,
    ) -> Result<Vec<String>, CompetitorError> {
        let url = format!(
            "{}/search?q={}",
            self.search_base_url,
            seed.replace(' ', "+")
        );

        let session = BrowserSession::launch(self.timeout).await?;

        // Capture the result before teardown so the session is released
        // on the error path as well
        let result =
            tokio::time::timeout(self.timeout, session.collect_heading_texts(&url, slots)).await;
        session.shutdown().await;

        match result {
            Ok(texts) => texts,
            Err(_) => Err(CompetitorError::Timeout),
        }
    }

    fn name(&self) -> &'static str {
        "chromium"
    }
}
