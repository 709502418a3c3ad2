//! Markdown-to-HTML renderer for narrative notebook cells.
//!
//! Handles the subset that shows up in uploaded notebooks: ATX headings,
//! unordered lists, fenced code blocks, horizontal rules, bold, italic,
//! inline code, and links. Everything else passes through as a plain
//! paragraph; unsupported syntax is never an error.
//!
//! The renderer is a single forward pass over lines with two pieces of
//! state (open fence, open list). All raw text is HTML-escaped before any
//! inline substitution so notebook content cannot inject markup.

use regex::Regex;
use std::sync::LazyLock;

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.*)$").expect("regex is compile-time constant"));

static LIST_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*+]\s+(.*)$").expect("regex is compile-time constant"));

static HRULE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(-{3,}|\*{3,})\s*$").expect("regex is compile-time constant"));

static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```\s*(\S*)\s*$").expect("regex is compile-time constant"));

// Inline substitutions, applied in fixed order: triple emphasis first so
// bold/italic cannot eat its delimiters, inline code and links last so
// they operate on text the emphasis passes left alone.
static TRIPLE_EMPHASIS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*\*(.+?)\*\*\*").expect("regex is compile-time constant"));

static BOLD_STARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("regex is compile-time constant"));

static BOLD_UNDERSCORES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__(.+?)__").expect("regex is compile-time constant"));

static ITALIC_STAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.+?)\*").expect("regex is compile-time constant"));

static ITALIC_UNDERSCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_(.+?)_").expect("regex is compile-time constant"));

static INLINE_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("regex is compile-time constant"));

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("regex is compile-time constant")
});

/// Escape text for safe embedding in HTML.
#[must_use = "returns the escaped text"]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Apply the inline formatting pass to one line of text.
///
/// Escapes first, then substitutes in fixed order. Order matters: later
/// patterns must not re-match text already rewritten by earlier ones.
fn render_inline(text: &str) -> String {
    let escaped = escape_html(text);
    let s = TRIPLE_EMPHASIS_RE.replace_all(&escaped, "<strong><em>$1</em></strong>");
    let s = BOLD_STARS_RE.replace_all(&s, "<strong>$1</strong>");
    let s = BOLD_UNDERSCORES_RE.replace_all(&s, "<strong>$1</strong>");
    let s = ITALIC_STAR_RE.replace_all(&s, "<em>$1</em>");
    let s = ITALIC_UNDERSCORE_RE.replace_all(&s, "<em>$1</em>");
    let s = INLINE_CODE_RE.replace_all(&s, "<code>$1</code>");
    let s = LINK_RE.replace_all(&s, r#"<a href="$2">$1</a>"#);
    s.into_owned()
}

/// Line-by-line renderer state.
struct MarkdownRenderer {
    html: String,
    in_list: bool,
    fence: Option<FenceState>,
}

struct FenceState {
    language: String,
    lines: Vec<String>,
}

impl MarkdownRenderer {
    fn new() -> Self {
        Self {
            html: String::new(),
            in_list: false,
            fence: None,
        }
    }

    fn push_line(&mut self, line: &str) {
        if let Some(caps) = FENCE_RE.captures(line) {
            match self.fence.take() {
                Some(fence) => self.flush_fence(fence),
                None => {
                    self.close_list();
                    self.fence = Some(FenceState {
                        language: caps[1].to_string(),
                        lines: Vec::new(),
                    });
                }
            }
            return;
        }

        if let Some(fence) = self.fence.as_mut() {
            // Fenced lines are kept verbatim, escaped only at flush.
            fence.lines.push(line.to_string());
            return;
        }

        if line.trim().is_empty() {
            self.close_list();
            return;
        }

        if let Some(caps) = HEADING_RE.captures(line) {
            let level = caps[1].len();
            let text = render_inline(&caps[2]);
            self.html.push_str(&format!("<h{level}>{text}</h{level}>\n"));
            return;
        }

        if HRULE_RE.is_match(line) {
            self.html.push_str("<hr />\n");
            return;
        }

        if let Some(caps) = LIST_ITEM_RE.captures(line) {
            if !self.in_list {
                self.html.push_str("<ul>\n");
                self.in_list = true;
            }
            let item = render_inline(&caps[1]);
            self.html.push_str(&format!("<li>{item}</li>\n"));
            return;
        }

        let paragraph = render_inline(line);
        self.html.push_str(&format!("<p>{paragraph}</p>\n"));
    }

    fn flush_fence(&mut self, fence: FenceState) {
        let body = escape_html(&fence.lines.join("\n"));
        if fence.language.is_empty() {
            self.html.push_str(&format!("<pre><code>{body}</code></pre>\n"));
        } else {
            let lang = escape_html(&fence.language);
            self.html.push_str(&format!(
                "<pre><code class=\"language-{lang}\">{body}</code></pre>\n"
            ));
        }
    }

    fn close_list(&mut self) {
        if self.in_list {
            self.html.push_str("</ul>\n");
            self.in_list = false;
        }
    }

    fn finish(mut self) -> String {
        // An unterminated fence still flushes as a code block.
        if let Some(fence) = self.fence.take() {
            self.flush_fence(fence);
        }
        self.close_list();
        self.html
    }
}

/// Render a markdown source string to an HTML fragment.
///
/// Pure text-to-text; never fails. Unknown syntax passes through as a
/// paragraph.
#[must_use = "returns the rendered HTML fragment"]
pub fn render_markdown(source: &str) -> String {
    let mut renderer = MarkdownRenderer::new();
    for line in source.lines() {
        renderer.push_line(line);
    }
    renderer.finish()
}
