// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum TrendsError {
    #[error("Trends request failed: {0}")]
    Network(String),
    #[error("Trends response could not be parsed: {0}")]
    Parse(String),
    #[error("No trends data available")]
    Empty,
}

/// 趋势数据提供方
///
/// 关键词研究管线依赖的外部趋势/联想服务抽象。
/// 生产实现基于显式构造的HTTP客户端，测试中可用假实现替换。
#[async_trait]
pub trait TrendsProvider: Send + Sync {
    /// 根据种子关键词返回相关关键词列表
    async fn related_keywords(&self, seed: &str) -> Result<Vec<String>, TrendsError>;

    /// 返回关键词过去十二个月的兴趣时间序列
    async fn interest_over_time(&self, keyword: &str) -> Result<Vec<f64>, TrendsError>;

    /// 提供方名称
    fn name(&self) -> &'static str;
}
