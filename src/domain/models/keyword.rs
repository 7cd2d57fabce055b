// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 关键词研究结果行
///
/// 每次研究请求即时组装，直接返回给调用方，从不落库。
/// 竞争对手列表固定为配置的槽位数，空槽用"N/A"填充。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordRecord {
    /// 关键词
    pub keyword: String,
    /// 近似搜索量（趋势序列均值，保留两位小数）
    pub search_volume: f64,
    /// 难度得分
    pub difficulty: f64,
    /// 平均趋势值（保留两位小数）
    pub average_trend: f64,
    /// 竞争对手标题列表
    pub competitors: Vec<String>,
}
