//! Bounce page rendering
//!
//! Produces the final HTML for a [`ResolvedPage`]. Title, description and
//! image come from third-party pages, so every interpolated value is escaped
//! for the context it lands in: HTML entities for text and attributes, a
//! JavaScript string literal for the redirect script.

use crate::page::ResolvedPage;

/// Render the bounce page document
///
/// Pure function of its input: same page, same bytes.
pub fn render(page: &ResolvedPage) -> String {
    let title = escape_html(&page.title);
    let description = escape_html(&page.description);
    let image = escape_html(&page.image_url);
    let canonical = escape_html(&page.canonical_url);
    let target_attr = escape_html(&page.target_url);
    let target_js = escape_js_string(&page.target_url);

    format!(
        r#"<!doctype html>
<html lang="ko">
<head>
<meta charset="utf-8">
<title>{title}</title>
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="description" content="{description}">
<meta name="robots" content="noindex">
<meta property="og:type" content="website">
<meta property="og:title" content="{title}">
<meta property="og:description" content="{description}">
<meta property="og:image" content="{image}">
<meta property="og:url" content="{canonical}">
<meta name="twitter:card" content="summary_large_image">
<link rel="canonical" href="{canonical}">
<script>(function(){{ window.location.replace("{target_js}"); }})();</script>
<style>html,body{{background:#fff;margin:0;height:100%;display:flex;align-items:center;justify-content:center;font:16px/1.4 -apple-system,BlinkMacSystemFont,Segoe UI,Roboto,Helvetica,Arial,Apple SD Gothic Neo,Noto Sans KR,sans-serif;color:#111}}</style>
</head>
<body>
<noscript>자바스크립트가 꺼져 있어요. <a href="{target_attr}">여기를 눌러 이동</a>하세요.</noscript>
</body>
</html>"#
    )
}

/// Escape text for HTML element content and quoted attribute values
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for the inside of a double-quoted JavaScript string inside a
/// `<script>` element
///
/// Markup-significant characters become `\u` escapes so the literal can
/// neither close the string nor the script element, while still evaluating
/// to the original text.
pub fn escape_js_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\u0022"),
            '\'' => out.push_str("\\u0027"),
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> ResolvedPage {
        ResolvedPage {
            logical_path: "/spring".to_string(),
            target_url: "https://store.example.com/event?id=1&ref=og".to_string(),
            title: "Spring Sale".to_string(),
            description: "Up to 50% off".to_string(),
            image_url: "https://store.example.com/og.png".to_string(),
            canonical_url: "https://shop.unigoods.im/spring".to_string(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&#34;x&#34;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("유니굿즈"), "유니굿즈");
    }

    #[test]
    fn test_escape_js_string() {
        assert_eq!(
            escape_js_string(r#"https://x.com/?a=1&b="</script>"#),
            r#"https://x.com/?a=1\u0026b=\u0022\u003c/script\u003e"#
        );
        assert_eq!(escape_js_string("a\\b\nc"), "a\\\\b\\nc");
        assert_eq!(escape_js_string("\u{2028}\u{0007}"), "\\u2028\\u0007");
    }

    #[test]
    fn test_document_shape() {
        let html = render(&page());

        assert!(html.starts_with("<!doctype html>\n<html lang=\"ko\">"));
        assert!(html.contains("<meta charset=\"utf-8\">"));
        assert!(html.contains("<title>Spring Sale</title>"));
        assert!(html.contains(r#"<meta name="description" content="Up to 50% off">"#));
        assert!(html.contains(r#"<meta name="robots" content="noindex">"#));
        assert!(html.contains(r#"<meta property="og:type" content="website">"#));
        assert!(html.contains(r#"<meta property="og:title" content="Spring Sale">"#));
        assert!(html.contains(r#"<meta property="og:description" content="Up to 50% off">"#));
        assert!(html.contains(r#"<meta property="og:image" content="https://store.example.com/og.png">"#));
        assert!(html.contains(r#"<meta property="og:url" content="https://shop.unigoods.im/spring">"#));
        assert!(html.contains(r#"<meta name="twitter:card" content="summary_large_image">"#));
        assert!(html.contains(r#"<link rel="canonical" href="https://shop.unigoods.im/spring">"#));
        assert!(html.contains("height:100%;display:flex"));
        assert!(html.ends_with("</html>"));
    }

    #[test]
    fn test_redirect_targets() {
        let html = render(&page());
        assert!(html.contains(
            r#"window.location.replace("https://store.example.com/event?id=1\u0026ref=og");"#
        ));
        assert!(html.contains(
            r#"<a href="https://store.example.com/event?id=1&amp;ref=og">여기를 눌러 이동</a>"#
        ));
    }

    #[test]
    fn test_hostile_metadata_is_escaped() {
        let mut page = page();
        page.title = "<script>alert(1)</script>".to_string();
        page.description = r#""><script>alert(2)</script>"#.to_string();
        page.image_url = r#"x" onerror="alert(3)"#.to_string();
        page.target_url = r#"https://x.com/");alert(4);</script><script>("#.to_string();

        let html = render(&page);

        assert_eq!(html.matches("<script>").count(), 1);
        assert_eq!(html.matches("</script>").count(), 1);
        assert!(html.contains("<title>&lt;script&gt;alert(1)&lt;/script&gt;</title>"));
        assert!(html.contains(
            r#"<meta property="og:title" content="&lt;script&gt;alert(1)&lt;/script&gt;">"#
        ));
        assert!(html.contains(
            r#"content="&#34;&gt;&lt;script&gt;alert(2)&lt;/script&gt;""#
        ));
        assert!(html.contains(r#"content="x&#34; onerror=&#34;alert(3)""#));
        assert!(!html.contains("\");alert(4)"));
    }

    #[test]
    fn test_render_is_deterministic() {
        assert_eq!(render(&page()), render(&page()));
    }
}
