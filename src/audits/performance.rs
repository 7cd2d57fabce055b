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

use crate::audits::fetcher::{FetchError, PageFetcher};
use crate::domain::models::audit::PerformanceReport;

/// 模拟的渲染时间指标，单位为秒
///
/// 全部由单次往返耗时（TTFB）叠加固定偏移量得到，
/// 不是真实的浏览器渲染测量值。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceTimings {
    pub first_contentful_paint: f64,
    pub speed_index: f64,
    pub largest_contentful_paint: f64,
    pub time_to_interactive: f64,
    pub total_blocking_time: f64,
}

impl PerformanceTimings {
    /// 由TTFB推导全部模拟指标
    pub fn from_ttfb(ttfb: f64) -> Self {
        // Fixed offsets: initial render, visible content, final large
        // paint, interactivity, blocking scripts
        let first_contentful_paint = ttfb + 0.5;
        let speed_index = first_contentful_paint + 0.8;
        let largest_contentful_paint = speed_index + 0.7;
        let time_to_interactive = largest_contentful_paint + 1.0;
        let total_blocking_time = ttfb + 0.1;

        Self {
            first_contentful_paint,
            speed_index,
            largest_contentful_paint,
            time_to_interactive,
            total_blocking_time,
        }
    }
}

/// 计算0-100性能得分
///
/// 从满分100开始，每个超过阈值的指标扣除固定分数，下限为0。
pub fn compute_performance_score(timings: &PerformanceTimings) -> f64 {
    let mut score: f64 = 100.0;

    if timings.first_contentful_paint > 2.5 {
        score -= 20.0;
    }
    if timings.speed_index > 3.0 {
        score -= 15.0;
    }
    if timings.largest_contentful_paint > 4.0 {
        score -= 10.0;
    }
    if timings.time_to_interactive > 5.0 {
        score -= 30.0;
    }
    if timings.total_blocking_time > 0.2 {
        score -= 25.0;
    }

    score.max(0.0)
}

/// 执行性能审计
///
/// 一次GET、固定超时、失败不重试。网络失败直接返回错误，
/// 不产生得分。
pub async fn audit_performance(
    fetcher: &PageFetcher,
    url: &str,
) -> Result<PerformanceReport, FetchError> {
    let page = fetcher.fetch(url).await?;

    let ttfb = page.elapsed.as_secs_f64();
    let timings = PerformanceTimings::from_ttfb(ttfb);
    let performance_score = compute_performance_score(&timings);

    Ok(PerformanceReport {
        status_code: page.status_code,
        content_size: format!("{:.2} KB", page.content_length as f64 / 1024.0),
        performance_score,
        first_contentful_paint: format!("{:.2} seconds", timings.first_contentful_paint),
        speed_index: format!("{:.2} seconds", timings.speed_index),
        largest_contentful_paint: format!("{:.2} seconds", timings.largest_contentful_paint),
        time_to_interactive: format!("{:.2} seconds", timings.time_to_interactive),
        total_blocking_time: format!("{:.2} seconds", timings.total_blocking_time),
    })
}
