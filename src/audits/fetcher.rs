// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::time::{Duration, Instant};
use thiserror::Error;

/// 抓取错误类型
#[derive(Error, Debug)]
pub enum FetchError {
    /// 网络请求失败
    #[error("Request failed: {0}")]
    Request(String),
    /// 服务端返回非2xx状态码
    #[error("Server responded with status {0}")]
    Status(u16),
}

/// 单次抓取的结果
///
/// 往返耗时覆盖从发出请求到响应体读取完毕的全程，
/// 是性能启发式唯一的真实计时输入。
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// HTTP状态码
    pub status_code: u16,
    /// 响应体文本
    pub body: String,
    /// 响应体字节数
    pub content_length: usize,
    /// 往返耗时
    pub elapsed: Duration,
}

/// 页面抓取器
///
/// 基于reqwest实现的同步语义抓取：一次GET、固定超时、不重试。
#[derive(Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    /// 创建新的抓取器实例
    ///
    /// # 参数
    ///
    /// * `timeout` - 单次请求的总超时时间
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (compatible; auditrs/0.1; +http://auditrs.dev)")
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { client }
    }

    /// 执行一次GET并计时
    ///
    /// 非2xx状态码不视为错误，由调用方自行解释。
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let start = Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status_code = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;
        let elapsed = start.elapsed();

        Ok(FetchedPage {
            status_code,
            content_length: body.len(),
            body,
            elapsed,
        })
    }

    /// 执行一次GET，非2xx状态码映射为错误
    ///
    /// SEO与无障碍审计使用该变体，与性能审计的宽松语义区分开。
    pub async fn fetch_ok(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let page = self.fetch(url).await?;
        if !(200..300).contains(&page.status_code) {
            return Err(FetchError::Status(page.status_code));
        }
        Ok(page)
    }
}
