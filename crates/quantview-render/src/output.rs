//! Code-cell output rendering.
//!
//! Produces one HTML fragment per output object, concatenated in original
//! order. Display data renders only its single best representation per
//! [`quantview_notebook::RENDER_PRIORITY`]; stream and traceback text is
//! always escaped. Embedded `text/html` is rendered raw: it originates
//! from a notebook the viewer chose to open, which is the trust model for
//! notebook-authored rich output.

use crate::markdown::escape_html;
use quantview_notebook::{MimeBundle, Output, StreamName};
use regex::Regex;
use std::sync::LazyLock;

// CSI color sequences of the form ESC [ ... m, as emitted by IPython
// tracebacks.
static ANSI_CSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("regex is compile-time constant"));

/// Strip ANSI color-escape sequences from traceback text.
#[must_use = "returns the stripped text"]
pub fn strip_ansi(text: &str) -> String {
    ANSI_CSI_RE.replace_all(text, "").into_owned()
}

/// Render a cell's outputs to an HTML fragment.
///
/// Returns an empty string when there are no outputs, so the caller can
/// omit the outputs container entirely rather than emitting an empty
/// shell.
#[must_use = "returns the rendered HTML fragment"]
pub fn render_outputs(outputs: &[Output]) -> String {
    outputs.iter().map(render_output).collect()
}

fn render_output(output: &Output) -> String {
    match output {
        Output::DisplayData { bundle } => render_display_data(bundle),
        Output::Stream { name, text } => {
            let class = match name {
                StreamName::Stdout => "output-stream",
                StreamName::Stderr => "output-stream output-stderr",
            };
            format!("<pre class=\"{class}\">{}</pre>\n", escape_html(text))
        }
        Output::Error { traceback } => {
            let text = strip_ansi(&traceback.join("\n"));
            format!("<pre class=\"output-error\">{}</pre>\n", escape_html(&text))
        }
    }
}

/// Render only the first matching representation; multiple representations
/// of the same output are never stacked.
fn render_display_data(bundle: &MimeBundle) -> String {
    let Some((mime, content)) = bundle.best() else {
        log::debug!("Display output with no renderable mime type, skipping");
        return String::new();
    };

    match mime {
        "image/png" | "image/jpeg" => {
            // Base64 payloads in notebooks carry line breaks; a data URI
            // must not.
            let payload: String = content.chars().filter(|c| !c.is_whitespace()).collect();
            format!(
                "<img class=\"output-image\" src=\"data:{mime};base64,{payload}\" alt=\"output\" />\n"
            )
        }
        "image/svg+xml" => format!("<div class=\"output-image\">{content}</div>\n"),
        "text/html" => format!("<div class=\"output-html\">{content}</div>\n"),
        "text/plain" => format!("<pre class=\"output-text\">{}</pre>\n", escape_html(content)),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(entries: &[(&str, &str)]) -> MimeBundle {
        MimeBundle::from_entries(
            entries
                .iter()
                .map(|(m, c)| ((*m).to_string(), (*c).to_string())),
        )
    }

    #[test]
    fn test_no_outputs_is_empty_fragment() {
        assert_eq!(render_outputs(&[]), "", "No outputs must yield no markup");
    }

    #[test]
    fn test_image_wins_over_plain_text() {
        let out = Output::DisplayData {
            bundle: bundle(&[("text/plain", "Figure(640x480)"), ("image/png", "aGk=")]),
        };
        let html = render_outputs(&[out]);
        assert!(
            html.contains("data:image/png;base64,aGk="),
            "PNG must be rendered, got: {html}"
        );
        assert!(
            !html.contains("Figure"),
            "Lower-priority representation must not also render, got: {html}"
        );
    }

    #[test]
    fn test_base64_line_breaks_removed() {
        let out = Output::DisplayData {
            bundle: bundle(&[("image/png", "aGVs\nbG8=\n")]),
        };
        let html = render_outputs(&[out]);
        assert!(html.contains("base64,aGVsbG8="));
    }

    #[test]
    fn test_html_rendered_raw() {
        let out = Output::DisplayData {
            bundle: bundle(&[("text/html", "<table><tr><td>1</td></tr></table>")]),
        };
        let html = render_outputs(&[out]);
        assert!(
            html.contains("<table>"),
            "text/html output is trusted and embedded raw, got: {html}"
        );
    }

    #[test]
    fn test_plain_text_escaped() {
        let out = Output::DisplayData {
            bundle: bundle(&[("text/plain", "<DataFrame>")]),
        };
        let html = render_outputs(&[out]);
        assert!(html.contains("&lt;DataFrame&gt;"));
        assert!(!html.contains("<DataFrame>"));
    }

    #[test]
    fn test_stream_stdout() {
        let out = Output::Stream {
            name: StreamName::Stdout,
            text: "1\n".to_string(),
        };
        let html = render_outputs(&[out]);
        assert!(html.contains("output-stream"));
        assert!(!html.contains("output-stderr"));
    }

    #[test]
    fn test_stderr_visually_distinguished() {
        let out = Output::Stream {
            name: StreamName::Stderr,
            text: "warning\n".to_string(),
        };
        let html = render_outputs(&[out]);
        assert!(
            html.contains("output-stderr"),
            "stderr must carry its own class, got: {html}"
        );
    }

    #[test]
    fn test_traceback_ansi_stripped() {
        let out = Output::Error {
            traceback: vec![
                "\u{1b}[0;31mZeroDivisionError\u{1b}[0m".to_string(),
                "division by zero".to_string(),
            ],
        };
        let html = render_outputs(&[out]);
        assert!(
            !html.contains('\u{1b}'),
            "Escape sequences must be stripped, got: {html:?}"
        );
        assert!(html.contains("ZeroDivisionError"));
        assert!(html.contains("division by zero"));
    }

    #[test]
    fn test_outputs_keep_original_order() {
        let outputs = [
            Output::Stream {
                name: StreamName::Stdout,
                text: "first".to_string(),
            },
            Output::DisplayData {
                bundle: bundle(&[("text/plain", "second")]),
            },
        ];
        let html = render_outputs(&outputs);
        let a = html.find("first").unwrap();
        let b = html.find("second").unwrap();
        assert!(a < b, "Fragments must keep output order, got: {html}");
    }

    #[test]
    fn test_strip_ansi_plain_text_untouched() {
        assert_eq!(strip_ansi("no escapes here"), "no escapes here");
    }
}
