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

use crate::domain::models::keyword::KeywordRecord;
use crate::domain::search::competitors::CompetitorSource;
use crate::domain::trends::provider::{TrendsError, TrendsProvider};
use crate::infrastructure::search::results_page::ResultsPageClient;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// 关键词研究错误类型
///
/// 只有关键词发现这一步会让整次研究失败；之后所有逐关键词的
/// 调用失败都降级为0值，批处理照常完成。
#[derive(Error, Debug)]
pub enum KeywordError {
    #[error("Keyword discovery failed: {0}")]
    Discovery(#[from] TrendsError),
}

/// 关键词研究服务
///
/// 顺序管线：相关关键词 → 搜索量 → 难度 → 趋势序列 → 竞争对手。
/// 所有逐关键词的网络调用串行执行，总时延是各次往返之和。
pub struct KeywordService {
    trends: Arc<dyn TrendsProvider>,
    serp: Arc<ResultsPageClient>,
    competitors: Arc<dyn CompetitorSource>,
    trend_points: usize,
    competitor_slots: usize,
}

impl KeywordService {
    /// 创建新的关键词研究服务实例
    pub fn new(
        trends: Arc<dyn TrendsProvider>,
        serp: Arc<ResultsPageClient>,
        competitors: Arc<dyn CompetitorSource>,
        trend_points: usize,
        competitor_slots: usize,
    ) -> Self {
        Self {
            trends,
            serp,
            competitors,
            trend_points,
            competitor_slots,
        }
    }

    /// 对种子关键词执行一次完整研究
    pub async fn research(&self, seed: &str) -> Result<Vec<KeywordRecord>, KeywordError> {
        info!("Keyword research for seed '{}'", seed);
        let related = self.trends.related_keywords(seed).await?;

        // One browser session per request; the same three slots are
        // attached to every row
        let competitors = match self
            .competitors
            .top_competitors(seed, self.competitor_slots)
            .await
        {
            Ok(names) => pad_competitors(names, self.competitor_slots),
            Err(e) => {
                warn!("Competitor analysis failed for '{}': {}", seed, e);
                pad_competitors(Vec::new(), self.competitor_slots)
            }
        };

        let mut rows = Vec::with_capacity(related.len());
        for keyword in related {
            let search_volume = round2(self.volume_for(&keyword).await);
            let difficulty = self.difficulty_for(&keyword).await;
            let trend_series = self.trend_series_for(&keyword).await;
            let average_trend = round2(mean(&trend_series));

            rows.push(KeywordRecord {
                keyword,
                search_volume,
                difficulty,
                average_trend,
                competitors: competitors.clone(),
            });
        }

        Ok(rows)
    }

    /// 搜索量：兴趣时间序列的均值，失败时为0
    async fn volume_for(&self, keyword: &str) -> f64 {
        match self.trends.interest_over_time(keyword).await {
            Ok(values) => mean(&values),
            Err(e) => {
                warn!("Search volume lookup failed for '{}': {}", keyword, e);
                0.0
            }
        }
    }

    /// 难度：三个独立抓取的信号加权合成
    async fn difficulty_for(&self, keyword: &str) -> f64 {
        let competition = match self.serp.competition(keyword).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Competition lookup failed for '{}': {}", keyword, e);
                0.0
            }
        };

        let trend_score = self.volume_for(keyword).await;

        let volume = match self.serp.approximate_volume(keyword).await {
            Ok(value) => value as f64,
            Err(e) => {
                warn!("Volume approximation failed for '{}': {}", keyword, e);
                0.0
            }
        };

        difficulty_score(competition, trend_score, volume)
    }

    /// 趋势序列：时间序列分桶成固定点数，失败时全0
    async fn trend_series_for(&self, keyword: &str) -> Vec<f64> {
        match self.trends.interest_over_time(keyword).await {
            Ok(values) => bucket_series(&values, self.trend_points),
            Err(e) => {
                warn!("Trend series lookup failed for '{}': {}", keyword, e);
                vec![0.0; self.trend_points]
            }
        }
    }
}

/// 难度得分公式
///
/// `0.4*competition + 0.4*trend + 0.2*log10(volume)`，保留两位小数；
/// 任一输入非正时直接为0。
pub fn difficulty_score(competition: f64, trend_score: f64, volume: f64) -> f64 {
    if competition > 0.0 && trend_score > 0.0 && volume > 0.0 {
        round2(competition * 0.4 + trend_score * 0.4 + volume.log10() * 0.2)
    } else {
        0.0
    }
}

/// 截断并用"N/A"补齐竞争对手槽位
pub fn pad_competitors(mut names: Vec<String>, slots: usize) -> Vec<String> {
    names.truncate(slots);
    while names.len() < slots {
        names.push("N/A".to_string());
    }
    names
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 把任意长度的序列分桶平均成固定点数
fn bucket_series(values: &[f64], points: usize) -> Vec<f64> {
    if values.is_empty() || points == 0 {
        return vec![0.0; points];
    }

    let mut series = Vec::with_capacity(points);
    for i in 0..points {
        let start = i * values.len() / points;
        let end = ((i + 1) * values.len() / points).max(start + 1);
        let bucket = &values[start..end.min(values.len())];
        series.push(mean(bucket));
    }
    series
}
