// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 从URL推导站点名称
///
/// 去掉方案和`www.`前缀，取第一个点号之前的部分并首字母大写。
/// 用于报告标题和报告文件命名。
pub fn site_name(url: &str) -> String {
    let stripped = url
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_start_matches("www.");
    let label = stripped.split('.').next().unwrap_or(stripped);
    capitalize(label)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_scheme_and_www() {
        assert_eq!(site_name("https://www.example.com"), "Example");
        assert_eq!(site_name("http://example.com/page"), "Example");
    }

    #[test]
    fn takes_prefix_before_first_dot() {
        assert_eq!(site_name("https://blog.example.co.uk"), "Blog");
    }

    #[test]
    fn capitalizes_first_letter_only() {
        assert_eq!(site_name("https://rUST-lang.org"), "Rust-lang");
    }
}
