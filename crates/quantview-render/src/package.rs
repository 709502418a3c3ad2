//! Standalone HTML document packaging.
//!
//! Assembles self-contained documents that open in a fresh browser tab
//! with no dependency on the hosting application: styling is inlined, and
//! nothing references external runtime state. The caller owns the blob it
//! gets back and is expected to release it when the view closes.
//!
//! Trust model, by policy: guide documents are admin-authored and embed
//! raw; notebook cell text and outputs are user uploads and are escaped
//! (except `text/html` outputs, which follow the notebook trust model in
//! [`crate::output`]).

use crate::markdown::{escape_html, render_markdown};
use crate::output::render_outputs;
use quantview_core::TabularPreview;
use quantview_notebook::{Cell, NotebookDocument};

/// Inlined stylesheet shared by every packaged document.
const STANDALONE_STYLE: &str = "\
body { margin: 0; padding: 2rem; background: #f5f5f5; font-family: -apple-system, 'Segoe UI', Helvetica, Arial, sans-serif; color: #1a1a2e; }
main { max-width: 60rem; margin: 0 auto; }
h1, h2, h3, h4, h5, h6 { color: #16213e; }
a { color: #0f3460; }
pre { background: #16213e; color: #e8e8e8; padding: 0.75rem 1rem; border-radius: 4px; overflow-x: auto; }
code { font-family: 'SF Mono', Menlo, Consolas, monospace; font-size: 0.9em; }
p code, li code { background: #e8e8f0; color: #16213e; padding: 0.1em 0.3em; border-radius: 3px; }
.cell { background: #ffffff; border: 1px solid #ddd; border-radius: 6px; padding: 1rem 1.25rem; margin-bottom: 1rem; }
.cell-code .prompt { color: #0f3460; font-family: monospace; font-size: 0.85em; margin-bottom: 0.5rem; }
.cell-raw pre { background: #fafafa; color: #555; border: 1px dashed #ccc; }
.outputs { margin-top: 0.75rem; border-top: 1px solid #eee; padding-top: 0.75rem; }
.output-stream { background: #fafafa; color: #1a1a2e; border-left: 3px solid #0f3460; }
.output-stderr { border-left-color: #c0392b; background: #fdf3f2; }
.output-error { background: #2d0b0b; color: #ff9f9f; }
.output-text { background: #fafafa; color: #1a1a2e; }
.output-image img, img.output-image { max-width: 100%; }
table { border-collapse: collapse; margin: 0.5rem 0; }
th, td { border: 1px solid #ccc; padding: 0.3rem 0.6rem; text-align: left; }
th { background: #16213e; color: #ffffff; }
.truncation-note { color: #777; font-style: italic; }
";

/// Wrap a body fragment in the self-contained document shell.
fn standalone_shell(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\" />\n\
         <title>{}</title>\n<style>\n{STANDALONE_STYLE}</style>\n</head>\n<body>\n\
         <main>\n{body}</main>\n</body>\n</html>\n",
        escape_html(title)
    )
}

/// Render a notebook's cells to an HTML fragment, in order, each cell
/// visually distinguished by type. This is also the inline-preview
/// fragment.
#[must_use = "returns the rendered HTML fragment"]
pub fn render_notebook_body(doc: &NotebookDocument) -> String {
    let mut body = String::new();
    for cell in &doc.cells {
        body.push_str(&render_cell(cell));
    }
    body
}

fn render_cell(cell: &Cell) -> String {
    match cell {
        Cell::Markdown { source } => {
            format!(
                "<section class=\"cell cell-markdown\">\n{}</section>\n",
                render_markdown(source)
            )
        }
        Cell::Code {
            source,
            execution_count,
            outputs,
        } => {
            let prompt = match execution_count {
                Some(n) => format!("In [{n}]:"),
                None => "In [ ]:".to_string(),
            };
            let rendered_outputs = render_outputs(outputs);
            let outputs_block = if rendered_outputs.is_empty() {
                // No outputs: omit the container entirely.
                String::new()
            } else {
                format!("<div class=\"outputs\">\n{rendered_outputs}</div>\n")
            };
            format!(
                "<section class=\"cell cell-code\">\n<div class=\"prompt\">{prompt}</div>\n\
                 <pre class=\"source\"><code>{}</code></pre>\n{outputs_block}</section>\n",
                escape_html(source)
            )
        }
        Cell::Raw { source } => {
            format!(
                "<section class=\"cell cell-raw\">\n<pre>{}</pre>\n</section>\n",
                escape_html(source)
            )
        }
    }
}

/// Package a parsed notebook as a standalone HTML document.
#[must_use = "returns the packaged document"]
pub fn package_notebook(doc: &NotebookDocument, filename: &str) -> String {
    let mut body = format!("<h1 class=\"document-title\">{}</h1>\n", escape_html(filename));
    if let Some(kernel) = &doc.metadata.kernel_display_name {
        body.push_str(&format!(
            "<p class=\"document-kernel\">Kernel: {}</p>\n",
            escape_html(kernel)
        ));
    }
    body.push_str(&render_notebook_body(doc));
    standalone_shell(filename, &body)
}

/// Package a tabular preview as a standalone HTML document.
///
/// The table shows the materialized rows; a truncation note reports the
/// true row count when the preview is capped.
#[must_use = "returns the packaged document"]
pub fn package_tabular(preview: &TabularPreview, filename: &str) -> String {
    let mut body = format!("<h1 class=\"document-title\">{}</h1>\n", escape_html(filename));
    body.push_str(&render_tabular_body(preview));
    standalone_shell(filename, &body)
}

/// Render a tabular preview as an HTML table fragment.
#[must_use = "returns the rendered HTML fragment"]
pub fn render_tabular_body(preview: &TabularPreview) -> String {
    let mut body = String::from("<table>\n<thead>\n<tr>");
    for header in &preview.headers {
        body.push_str(&format!("<th>{}</th>", escape_html(header)));
    }
    body.push_str("</tr>\n</thead>\n<tbody>\n");
    for row in &preview.rows {
        body.push_str("<tr>");
        for field in row {
            body.push_str(&format!("<td>{}</td>", escape_html(field)));
        }
        body.push_str("</tr>\n");
    }
    body.push_str("</tbody>\n</table>\n");
    if preview.is_truncated() {
        body.push_str(&format!(
            "<p class=\"truncation-note\">{}</p>\n",
            preview.summary()
        ));
    }
    body
}

/// Package a guide document.
///
/// Dual mode: content that already is a complete document (leading
/// doctype or `<html>` root) passes through byte-identical; a fragment is
/// wrapped in the standalone shell. The content embeds raw either way.
#[must_use = "returns the packaged document"]
pub fn package_guide(html_content: &str, title: &str) -> String {
    if is_complete_document(html_content) {
        return html_content.to_string();
    }
    standalone_shell(title, html_content)
}

fn is_complete_document(content: &str) -> bool {
    let head = content.trim_start();
    let lowered = head
        .get(..15.min(head.len()))
        .unwrap_or_default()
        .to_lowercase();
    lowered.starts_with("<!doctype") || lowered.starts_with("<html")
}
