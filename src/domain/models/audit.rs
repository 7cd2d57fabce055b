// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 性能审计结果
///
/// 由单次抓取的状态码、字节数和往返耗时推导出的启发式指标。
/// 五个时间指标并非真实浏览器渲染测量值，而是在TTFB之上叠加
/// 固定偏移量得到的模拟值，展示时格式化为两位小数的字符串。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceReport {
    /// HTTP状态码
    pub status_code: u16,
    /// 响应内容大小，格式为"{:.2} KB"
    pub content_size: String,
    /// 0-100性能得分
    pub performance_score: f64,
    /// 首次内容绘制，格式为"{:.2} seconds"
    pub first_contentful_paint: String,
    /// 速度指数
    pub speed_index: String,
    /// 最大内容绘制
    pub largest_contentful_paint: String,
    /// 可交互时间
    pub time_to_interactive: String,
    /// 总阻塞时间
    pub total_blocking_time: String,
}

/// SEO审计结果
///
/// 成功解析页面后提取的元数据。页面上缺失的字段用字面量"N/A"
/// 占位；整节失败时不会产生该结构，而是`SectionOutcome::Failed`。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeoReport {
    /// 页面标题文本
    pub seo_title: String,
    /// meta description内容
    pub seo_meta_description: String,
    /// 按文档顺序排列的h1标题文本
    pub h1_tags: Vec<String>,
    /// 按文档顺序排列的h2标题文本
    pub h2_tags: Vec<String>,
    /// canonical链接地址
    pub canonical_url: String,
}

/// 无障碍审计结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessibilityReport {
    /// 缺少显式ARIA role属性的元素数量
    pub missing_aria_roles: u32,
    /// 标题层级跳跃问题数量
    pub header_issues: u32,
    /// 缺少alt属性的图片数量
    pub missing_alt_attributes: u32,
}

impl AccessibilityReport {
    /// 三类子计数之和
    pub fn total_issues(&self) -> u32 {
        self.missing_aria_roles + self.header_issues + self.missing_alt_attributes
    }
}

/// 审计小节结果
///
/// 显式区分"成功得到数值"与"该小节不可用"两种情形，
/// 调用方据此能把"0个问题"与"未知"区分开来。
#[derive(Debug, Clone)]
pub enum SectionOutcome<T> {
    /// 小节成功完成
    Completed(T),
    /// 小节失败，携带失败原因
    Failed {
        /// 失败原因，仅用于日志与展示
        reason: String,
    },
}

impl<T> SectionOutcome<T> {
    /// 成功结果的引用，失败时为None
    pub fn completed(&self) -> Option<&T> {
        match self {
            SectionOutcome::Completed(value) => Some(value),
            SectionOutcome::Failed { .. } => None,
        }
    }

    /// 失败原因，成功时为None
    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            SectionOutcome::Completed(_) => None,
            SectionOutcome::Failed { reason } => Some(reason.as_str()),
        }
    }
}

/// 一次完整审计的产出
///
/// 三个小节的结果加上已生成报告的相对路径。
#[derive(Debug, Clone)]
pub struct AuditOutcome {
    /// 被审计的URL
    pub url: String,
    /// 性能小节，失败会中止整个审计，因此这里总是成功值
    pub performance: PerformanceReport,
    /// SEO小节
    pub seo: SectionOutcome<SeoReport>,
    /// 无障碍小节
    pub accessibility: SectionOutcome<AccessibilityReport>,
    /// PDF报告的相对路径
    pub report_path: String,
}

impl AuditOutcome {
    /// 无障碍问题总数的持久化投影
    ///
    /// 小节失败时沿用历史行为：按0个问题落库。
    pub fn accessibility_issues_total(&self) -> u32 {
        self.accessibility
            .completed()
            .map(AccessibilityReport::total_issues)
            .unwrap_or(0)
    }
}

/// 审计历史记录
///
/// 持久化的审计摘要，只追加、不更新、不删除。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    /// 自增主键
    pub id: i32,
    /// 被审计的URL
    pub url: String,
    /// 0-100性能得分
    pub performance_score: f64,
    /// SEO标题，小节失败时为空
    pub seo_title: Option<String>,
    /// SEO描述，小节失败时为空
    pub seo_meta_description: Option<String>,
    /// 无障碍问题总数
    pub accessibility_issues: i32,
    /// 报告文件的相对路径
    pub report_path: String,
    /// 记录创建时间
    pub created_at: DateTime<Utc>,
}

/// 待插入的审计记录
#[derive(Debug, Clone)]
pub struct NewAuditRecord {
    pub url: String,
    pub performance_score: f64,
    pub seo_title: Option<String>,
    pub seo_meta_description: Option<String>,
    pub accessibility_issues: i32,
    pub report_path: String,
}
