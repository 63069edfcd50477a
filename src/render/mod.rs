//! HTML views. Every page gets the render timestamp for its footer.

mod views;
pub use views::*;

use chrono::{DateTime, Local};

/// Values exposed to every rendered view.
#[derive(Clone, Debug)]
pub struct PageContext {
    pub now: DateTime<Local>,
}

impl PageContext {
    pub fn now() -> Self {
        PageContext { now: Local::now() }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Danger,
}

/// One feedback message at the top of a page.
#[derive(Clone, Debug)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

impl Banner {
    pub fn success(message: impl Into<String>) -> Self {
        Banner { kind: BannerKind::Success, message: message.into() }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Banner { kind: BannerKind::Danger, message: message.into() }
    }
}

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(ctx: &PageContext, title: &str, banner: Option<&Banner>, body: &str) -> String {
    let banner_html = banner
        .map(|b| {
            let class = match b.kind {
                BannerKind::Success => "success",
                BannerKind::Danger => "danger",
            };
            format!(
                "<div class=\"alert alert-{}\" role=\"alert\">{}</div>\n",
                class,
                escape(&b.message)
            )
        })
        .unwrap_or_default();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<nav><a href="/">Home</a> | <a href="/system_info">Systems</a> | <a href="/router_info">Routers</a></nav>
<main>
<h1>{title}</h1>
{banner_html}{body}
</main>
<footer>&copy; {year} IT Asset Inventory. Rendered {now}</footer>
</body>
</html>
"#,
        title = escape(title),
        banner_html = banner_html,
        body = body,
        year = ctx.now.format("%Y"),
        now = ctx.now.format("%Y-%m-%d %H:%M:%S"),
    )
}
