// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::audits::fetcher::PageFetcher;
use crate::domain::models::audit::{AccessibilityReport, SectionOutcome};
use scraper::{Html, Selector};
use tracing::warn;

/// 统计标题层级跳跃
///
/// 期望层级从1开始，按文档顺序扫描：当某个标题的层级比前一个
/// 标题的层级大超过1时计一次问题（例如h2之后直接出现h4）。
pub fn count_heading_skips(levels: &[u32]) -> u32 {
    let mut issues = 0;
    let mut expected = 1;
    for &level in levels {
        if level > expected + 1 {
            issues += 1;
        }
        expected = level;
    }
    issues
}

/// 从HTML文档统计无障碍问题
///
/// 三类计数：缺少role属性的元素、标题层级跳跃、缺少alt的图片。
/// 空字符串属性与缺失同样计入。
pub fn inspect_accessibility(html: &str) -> AccessibilityReport {
    let document = Html::parse_document(html);

    let any_selector = Selector::parse("*").unwrap();
    let heading_selector = Selector::parse("h1, h2, h3, h4, h5, h6").unwrap();
    let img_selector = Selector::parse("img").unwrap();

    let missing_aria_roles = document
        .select(&any_selector)
        .filter(|el| el.value().attr("role").map_or(true, |r| r.is_empty()))
        .count() as u32;

    let levels: Vec<u32> = document
        .select(&heading_selector)
        .filter_map(|el| el.value().name().strip_prefix('h')?.parse().ok())
        .collect();
    let header_issues = count_heading_skips(&levels);

    let missing_alt_attributes = document
        .select(&img_selector)
        .filter(|el| el.value().attr("alt").map_or(true, |a| a.is_empty()))
        .count() as u32;

    AccessibilityReport {
        missing_aria_roles,
        header_issues,
        missing_alt_attributes,
    }
}

/// 执行无障碍审计
///
/// 抓取失败时返回`Failed`小节结果。历史投影规则把失败算作
/// 0个问题、三项子计数置空，该行为有回归测试守护。
pub async fn audit_accessibility(
    fetcher: &PageFetcher,
    url: &str,
) -> SectionOutcome<AccessibilityReport> {
    match fetcher.fetch_ok(url).await {
        Ok(page) => SectionOutcome::Completed(inspect_accessibility(&page.body)),
        Err(e) => {
            warn!("Accessibility audit failed for {}: {}", url, e);
            SectionOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}
