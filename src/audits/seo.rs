// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::audits::fetcher::PageFetcher;
use crate::domain::models::audit::{SectionOutcome, SeoReport};
use scraper::{Html, Selector};
use tracing::warn;

/// 页面上缺失字段的占位值
const MISSING: &str = "N/A";

/// 从HTML文档提取SEO元数据
///
/// 只在成功取得文档时调用；缺失的单个字段用"N/A"占位。
pub fn extract_seo(html: &str) -> SeoReport {
    let document = Html::parse_document(html);

    let title_selector = Selector::parse("title").unwrap();
    let meta_selector = Selector::parse(r#"meta[name="description"]"#).unwrap();
    let canonical_selector = Selector::parse(r#"link[rel="canonical"]"#).unwrap();
    let h1_selector = Selector::parse("h1").unwrap();
    let h2_selector = Selector::parse("h2").unwrap();

    let seo_title = document
        .select(&title_selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_else(|| MISSING.to_string());

    let seo_meta_description = document
        .select(&meta_selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|content| content.trim().to_string())
        .unwrap_or_else(|| MISSING.to_string());

    let canonical_url = document
        .select(&canonical_selector)
        .next()
        .and_then(|el| el.value().attr("href"))
        .map(|href| href.to_string())
        .unwrap_or_else(|| MISSING.to_string());

    let h1_tags = document
        .select(&h1_selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect();
    let h2_tags = document
        .select(&h2_selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect();

    SeoReport {
        seo_title,
        seo_meta_description,
        h1_tags,
        h2_tags,
        canonical_url,
    }
}

/// 执行SEO审计
///
/// 抓取或解析失败时降级为`Failed`小节结果，由调用方投影成
/// 全空字段；审计流程本身继续进行。
pub async fn audit_seo(fetcher: &PageFetcher, url: &str) -> SectionOutcome<SeoReport> {
    match fetcher.fetch_ok(url).await {
        Ok(page) => SectionOutcome::Completed(extract_seo(&page.body)),
        Err(e) => {
            warn!("SEO audit failed for {}: {}", url, e);
            SectionOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}
