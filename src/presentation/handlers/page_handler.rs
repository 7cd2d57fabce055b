// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::response::Html;

/// Static informational pages. Each template is embedded at compile
/// time; none of them has dynamic behavior.
macro_rules! static_page {
    ($name:ident, $file:literal) => {
        pub async fn $name() -> Html<&'static str> {
            Html(include_str!(concat!("../../../templates/", $file)))
        }
    };
}

static_page!(index, "index.html");
static_page!(pricing, "pricing.html");
static_page!(contact, "contact.html");
static_page!(blog, "blog.html");
static_page!(testimonial, "testimonial.html");
static_page!(privacy_policy, "privacy_policy.html");
static_page!(terms_conditions, "terms_conditions.html");
static_page!(metrics_glossary, "metrics_glossary.html");
static_page!(authentication_form, "authentication_form.html");
static_page!(accessibility_check, "accessibility_check.html");
static_page!(performance_audit, "performance_audit.html");
static_page!(seo_analysis, "seo_analysis.html");
static_page!(not_found, "404.html");
