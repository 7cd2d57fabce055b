// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::audit::{
    AccessibilityReport, PerformanceReport, SectionOutcome, SeoReport,
};
use crate::utils::url_utils::site_name;
use printpdf::{BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rgb};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use thiserror::Error;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const TOP_MM: f32 = 280.0;
const BOTTOM_MM: f32 = 25.0;
const LEFT_MM: f32 = 20.0;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Report I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF rendering failed: {0}")]
    Render(String),
}

/// 报告中的一行内容
enum Line {
    Banner(String),
    Link(String),
    Heading(String),
    Body(String),
}

impl Line {
    fn height(&self) -> f32 {
        match self {
            Line::Banner(_) => 12.0,
            Line::Link(_) => 10.0,
            Line::Heading(_) => 8.0,
            Line::Body(_) => 7.0,
        }
    }
}

/// PDF审计报告输出器
///
/// 固定版式：首页横幅、术语表链接、三个指标小节、收尾链接以及
/// 每页页脚。输出路径由站点名决定，同名前缀的站点会互相覆盖。
pub struct PdfReportWriter {
    reports_dir: PathBuf,
    public_base_url: String,
}

impl PdfReportWriter {
    /// 创建新的报告输出器
    ///
    /// # 参数
    ///
    /// * `reports_dir` - 报告输出目录
    /// * `public_base_url` - 对外基础URL，用于报告内指向术语表和审计表单的链接
    pub fn new(reports_dir: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            reports_dir: reports_dir.into(),
            public_base_url: public_base_url.into(),
        }
    }

    /// 站点的确定性报告文件名
    pub fn report_filename(site: &str) -> String {
        format!("Audit_Report_for_{}_by_Auditrs.pdf", site)
    }

    /// 渲染并写出报告，返回相对路径
    pub fn write_report(
        &self,
        url: &str,
        performance: &PerformanceReport,
        seo: &SectionOutcome<SeoReport>,
        accessibility: &SectionOutcome<AccessibilityReport>,
    ) -> Result<String, ReportError> {
        let site = site_name(url);
        let glossary_link = format!(
            "Click me for the meanings of the metrics in this report ({}/metrics_glossary)",
            self.public_base_url
        );

        let mut lines = vec![
            Line::Banner(format!("Website Audit Report for {} by Auditrs", site)),
            Line::Link(glossary_link.clone()),
            Line::Heading("Website Details:".to_string()),
        ];
        push_body_wrapped(&mut lines, &format!("URL: {}", url));

        lines.push(Line::Heading("Performance Metrics:".to_string()));
        for (key, value) in performance_entries(performance) {
            push_body_wrapped(&mut lines, &format!("{}: {}", label_case(key), value));
        }

        lines.push(Line::Heading("SEO Metrics:".to_string()));
        match seo.completed() {
            Some(report) => {
                for (key, value) in seo_entries(report) {
                    push_body_wrapped(&mut lines, &format!("{}: {}", label_case(key), value));
                }
            }
            None => push_body_wrapped(
                &mut lines,
                &format!(
                    "Audit unavailable ({})",
                    seo.failure_reason().unwrap_or("unknown")
                ),
            ),
        }

        lines.push(Line::Heading("Accessibility Metrics:".to_string()));
        match accessibility.completed() {
            Some(report) => {
                for (key, value) in accessibility_entries(report) {
                    push_body_wrapped(&mut lines, &format!("{}: {}", label_case(key), value));
                }
            }
            None => push_body_wrapped(
                &mut lines,
                &format!(
                    "Audit unavailable ({})",
                    accessibility.failure_reason().unwrap_or("unknown")
                ),
            ),
        }

        lines.push(Line::Link(glossary_link));

        let filename = Self::report_filename(&site);
        std::fs::create_dir_all(&self.reports_dir)?;
        let path = self.reports_dir.join(&filename);

        self.render(&site, &lines, &path)?;

        Ok(format!("{}/{}", self.reports_dir.display(), filename))
    }

    fn render(
        &self,
        site: &str,
        lines: &[Line],
        path: &std::path::Path,
    ) -> Result<(), ReportError> {
        let (doc, first_page, first_layer) = PdfDocument::new(
            format!("Website Audit Report for {}", site),
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "Layer 1",
        );

        let times = builtin(&doc, BuiltinFont::TimesRoman)?;
        let times_bold = builtin(&doc, BuiltinFont::TimesBold)?;
        let times_italic = builtin(&doc, BuiltinFont::TimesItalic)?;

        let mut layer = doc.get_page(first_page).get_layer(first_layer);
        let mut y = TOP_MM;
        let mut page_no = 1;

        for line in lines {
            if y - line.height() < BOTTOM_MM {
                draw_footer(&layer, page_no, &self.public_base_url, &times_italic);
                let (page, new_layer) =
                    doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
                layer = doc.get_page(page).get_layer(new_layer);
                page_no += 1;
                y = TOP_MM;
            }

            match line {
                Line::Banner(text) => {
                    layer.use_text(text.clone(), 18.0, Mm(LEFT_MM), Mm(y), &times_bold);
                }
                Line::Link(text) => {
                    layer.set_fill_color(link_color());
                    layer.use_text(text.clone(), 14.0, Mm(LEFT_MM), Mm(y), &times_bold);
                    layer.set_fill_color(text_color());
                }
                Line::Heading(text) => {
                    layer.use_text(text.clone(), 12.0, Mm(LEFT_MM), Mm(y), &times_bold);
                }
                Line::Body(text) => {
                    layer.use_text(text.clone(), 12.0, Mm(LEFT_MM), Mm(y), &times);
                }
            }
            y -= line.height();
        }

        draw_footer(&layer, page_no, &self.public_base_url, &times_italic);

        doc.save(&mut BufWriter::new(File::create(path)?))
            .map_err(|e| ReportError::Render(e.to_string()))
    }
}

fn builtin(
    doc: &printpdf::PdfDocumentReference,
    font: BuiltinFont,
) -> Result<IndirectFontRef, ReportError> {
    doc.add_builtin_font(font)
        .map_err(|e| ReportError::Render(e.to_string()))
}

fn link_color() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 1.0, None))
}

fn text_color() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

fn draw_footer(
    layer: &PdfLayerReference,
    page_no: usize,
    public_base_url: &str,
    italic: &IndirectFontRef,
) {
    layer.set_fill_color(link_color());
    layer.use_text(
        format!("Auditrs ({}/audit)", public_base_url),
        8.0,
        Mm(70.0),
        Mm(12.0),
        italic,
    );
    layer.set_fill_color(text_color());
    layer.use_text(format!("| Page {}", page_no), 8.0, Mm(125.0), Mm(12.0), italic);
}

/// 把snake_case键名转成标签写法
fn label_case(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn push_body_wrapped(lines: &mut Vec<Line>, text: &str) {
    for chunk in wrap_text(text, 92) {
        lines.push(Line::Body(chunk));
    }
}

/// 按空白处折行，超长的单词整体占一行
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > max_chars {
            out.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        out.push(current);
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}

fn performance_entries(report: &PerformanceReport) -> Vec<(&'static str, String)> {
    vec![
        ("status_code", report.status_code.to_string()),
        ("content_size", report.content_size.clone()),
        ("performance_score", report.performance_score.to_string()),
        (
            "first_contentful_paint",
            report.first_contentful_paint.clone(),
        ),
        ("speed_index", report.speed_index.clone()),
        (
            "largest_contentful_paint",
            report.largest_contentful_paint.clone(),
        ),
        ("time_to_interactive", report.time_to_interactive.clone()),
        ("total_blocking_time", report.total_blocking_time.clone()),
    ]
}

fn seo_entries(report: &SeoReport) -> Vec<(&'static str, String)> {
    vec![
        ("seo_title", report.seo_title.clone()),
        ("seo_meta_description", report.seo_meta_description.clone()),
        ("h1_tags", report.h1_tags.join(", ")),
        ("h2_tags", report.h2_tags.join(", ")),
        ("canonical_url", report.canonical_url.clone()),
    ]
}

fn accessibility_entries(report: &AccessibilityReport) -> Vec<(&'static str, String)> {
    vec![
        ("missing_aria_roles", report.missing_aria_roles.to_string()),
        ("header_issues", report.header_issues.to_string()),
        (
            "missing_alt_attributes",
            report.missing_alt_attributes.to_string(),
        ),
        ("accessibility_issues", report.total_issues().to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_performance() -> PerformanceReport {
        PerformanceReport {
            status_code: 200,
            content_size: "12.34 KB".to_string(),
            performance_score: 75.0,
            first_contentful_paint: "0.60 seconds".to_string(),
            speed_index: "1.40 seconds".to_string(),
            largest_contentful_paint: "2.10 seconds".to_string(),
            time_to_interactive: "3.10 seconds".to_string(),
            total_blocking_time: "0.21 seconds".to_string(),
        }
    }

    #[test]
    fn writes_a_pdf_with_signature() {
        let dir = tempfile::tempdir().unwrap();
        let writer = PdfReportWriter::new(dir.path(), "http://127.0.0.1:3000");

        let seo = SectionOutcome::Completed(SeoReport {
            seo_title: "Example".to_string(),
            seo_meta_description: "N/A".to_string(),
            h1_tags: vec!["One".to_string()],
            h2_tags: vec![],
            canonical_url: "N/A".to_string(),
        });
        let accessibility = SectionOutcome::Failed {
            reason: "Server responded with status 500".to_string(),
        };

        let path = writer
            .write_report(
                "https://www.example.com",
                &sample_performance(),
                &seo,
                &accessibility,
            )
            .unwrap();

        assert!(path.ends_with("Audit_Report_for_Example_by_Auditrs.pdf"));
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.len() > 4);
        assert_eq!(&bytes[..4], b"%PDF");
    }

    #[test]
    fn same_site_prefix_maps_to_the_same_file() {
        assert_eq!(
            PdfReportWriter::report_filename("Example"),
            "Audit_Report_for_Example_by_Auditrs.pdf"
        );
    }

    #[test]
    fn label_case_title_cases_snake_keys() {
        assert_eq!(label_case("first_contentful_paint"), "First Contentful Paint");
        assert_eq!(label_case("seo_title"), "Seo Title");
    }

    #[test]
    fn wrap_text_splits_on_whitespace() {
        let wrapped = wrap_text("aaa bbb ccc ddd", 7);
        assert_eq!(wrapped, vec!["aaa bbb", "ccc ddd"]);
    }
}
