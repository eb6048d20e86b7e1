//! Tiny markdown to HTML conversion.
//!
//! Recommendation documents use a deliberately small markdown subset:
//! `#`/`##`/`###` headings, `-`/`*` bullets, and `[text](http(s)://url)`
//! links. [`md_to_html`] converts exactly that subset in one fixed pass:
//!
//! 1. Escape `&`, `<` and `>`
//! 2. Headings become `<h1>`..`<h3>`
//! 3. Bullet lines become `<li>`
//! 4. Each run of consecutive `<li>` lines is wrapped in one `<ul>`
//! 5. Links become anchors that open in a new tab with `rel="noopener"`
//! 6. Two or more consecutive newlines become `<br/>`
//!
//! CRLF line endings convert the same way as LF.
//!
//! Single newlines next to a heading or list are dropped, since the block
//! element already breaks the line. Other single newlines are kept.
//!
//! The conversion is not idempotent (escaping is applied again on a second
//! pass), so convert each raw document exactly once.
//!
//! # Example
//!
//! ```
//! use hoa_content::md_to_html;
//!
//! let html = md_to_html("# Title\n- a\n- b\n[x](https://e.com)");
//! assert_eq!(
//!     html,
//!     "<h1>Title</h1><ul><li>a</li><li>b</li></ul>\
//!      <a href=\"https://e.com\" target=\"_blank\" rel=\"noopener\">x</a>"
//! );
//! ```

use std::sync::LazyLock;

use regex::Regex;

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,3}) (.*)$").expect("Invalid heading regex"));

static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*] (.*)$").expect("Invalid bullet regex"));

// `"` is excluded from the URL so it cannot close the href attribute.
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\[(.+?)\]\((https?://[^\s)"]+)\)"#).expect("Invalid link regex")
});

static PARAGRAPH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\r?\n){2,}").expect("Invalid paragraph regex"));

static AFTER_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(</(?:h[1-3]|ul)>)\r?\n").expect("Invalid block-close regex"));

static BEFORE_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n(<(?:h[1-3]|ul)>)").expect("Invalid block-open regex"));

/// Escape the three characters that could open or break a tag.
///
/// # Example
///
/// ```
/// use hoa_content::escape_html;
///
/// assert_eq!(escape_html("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
/// ```
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// One line after the heading and bullet transforms.
enum Line {
    Item(String),
    Other(String),
}

fn convert_line(line: &str) -> Line {
    // A CRLF line ending stays outside the generated tags.
    let (body, cr) = match line.strip_suffix('\r') {
        Some(body) => (body, "\r"),
        None => (line, ""),
    };
    if let Some(caps) = HEADING_RE.captures(body) {
        let level = caps[1].len();
        return Line::Other(format!("<h{level}>{}</h{level}>{cr}", &caps[2]));
    }
    if let Some(caps) = BULLET_RE.captures(body) {
        return Line::Item(format!("<li>{}</li>", &caps[1]));
    }
    Line::Other(line.to_string())
}

/// Wrap each run of consecutive list items in a single `<ul>`.
fn wrap_lists(lines: Vec<Line>) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut run: Vec<String> = Vec::new();

    for line in lines {
        match line {
            Line::Item(item) => run.push(item),
            Line::Other(text) => {
                if !run.is_empty() {
                    out.push(format!("<ul>{}</ul>", run.concat()));
                    run.clear();
                }
                out.push(text);
            }
        }
    }
    if !run.is_empty() {
        out.push(format!("<ul>{}</ul>", run.concat()));
    }
    out
}

/// Convert the recommendation markdown subset to HTML.
pub fn md_to_html(md: &str) -> String {
    let escaped = escape_html(md);
    let lines = escaped.split('\n').map(convert_line).collect();
    let html = wrap_lists(lines).join("\n");

    let html = LINK_RE.replace_all(
        &html,
        r#"<a href="$2" target="_blank" rel="noopener">$1</a>"#,
    );
    let html = PARAGRAPH_RE.replace_all(&html, "<br/>");
    let html = AFTER_BLOCK_RE.replace_all(&html, "$1");
    BEFORE_BLOCK_RE.replace_all(&html, "$1").into_owned()
}
