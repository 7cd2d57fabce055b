// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum CompetitorError {
    #[error("Browser error: {0}")]
    Browser(String),
    #[error("Competitor lookup timed out")]
    Timeout,
}

/// 竞争对手来源
///
/// 为种子关键词返回排名靠前的结果标题。生产实现驱动无头浏览器
/// 抓取搜索结果页；管线测试使用假实现，避免依赖本机Chrome。
#[async_trait]
pub trait CompetitorSource: Send + Sync {
    /// 返回最多`slots`个非空结果标题，按出现顺序排列
    async fn top_competitors(&self, seed: &str, slots: usize)
        -> Result<Vec<String>, CompetitorError>;

    /// 来源名称
    fn name(&self) -> &'static str;
}
