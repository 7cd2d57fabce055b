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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含服务器、数据库、审计和关键词研究等所有配置项
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 数据库配置
    pub database: DatabaseSettings,
    /// 审计配置
    pub audit: AuditSettings,
    /// 关键词研究配置
    pub keywords: KeywordSettings,
}

/// 服务器配置设置
#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 数据库配置设置
#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
}

/// 审计配置设置
#[derive(Debug, Deserialize, Clone)]
pub struct AuditSettings {
    /// 页面抓取超时时间（秒）
    pub fetch_timeout: u64,
    /// PDF报告输出目录
    pub reports_dir: String,
    /// 对外基础URL，用于报告内的链接
    pub public_base_url: String,
}

/// 关键词研究配置设置
#[derive(Debug, Deserialize, Clone)]
pub struct KeywordSettings {
    /// 趋势服务基础URL
    pub trends_base_url: String,
    /// 搜索结果页基础URL
    pub search_base_url: String,
    /// 无头浏览器操作超时时间（秒）
    pub browser_timeout: u64,
    /// 趋势序列点数
    pub trend_points: usize,
    /// 竞争对手槽位数
    pub competitor_slots: usize,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            // Default DB pool settings
            .set_default("database.url", "sqlite://audit_history.db?mode=rwc")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            // Default audit settings
            .set_default("audit.fetch_timeout", 30)?
            .set_default("audit.reports_dir", "static/reports")?
            .set_default("audit.public_base_url", "http://127.0.0.1:3000")?
            // Default keyword research settings
            .set_default("keywords.trends_base_url", "https://trends.google.com")?
            .set_default("keywords.search_base_url", "https://www.google.com")?
            .set_default("keywords.browser_timeout", 30)?
            .set_default("keywords.trend_points", 12)?
            .set_default("keywords.competitor_slots", 3)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("AUDITRS").separator("__"));

        builder.build()?.try_deserialize()
    }
}
