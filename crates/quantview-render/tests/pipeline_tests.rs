//! End-to-end pipeline tests: raw bytes through parsing, rendering, and
//! packaging.

use quantview_core::{FsObjectStore, ViewerError};
use quantview_notebook::parse_notebook_from_str;
use quantview_render::{
    package_guide, package_notebook, parse_csv_preview, render_markdown, render_notebook_body,
    FileViewer, Preview,
};
use std::fs;

// ========================================
// Notebook rendering end to end
// ========================================

#[test]
fn test_markdown_then_code_then_stream_scenario() {
    // A two-cell notebook: markdown heading, then an executed code cell
    // with one stdout stream output.
    let json = r##"{"cells":[
        {"cell_type":"markdown","source":["# Hi"]},
        {"cell_type":"code","execution_count":1,"source":"print(1)",
         "outputs":[{"output_type":"stream","name":"stdout","text":"1\n"}]}
    ]}"##;

    let doc = parse_notebook_from_str(json).unwrap();
    let html = package_notebook(&doc, "demo.ipynb");

    let heading = html.find("<h1>Hi</h1>").expect("heading must render");
    let prompt = html.find("In [1]:").expect("execution label must render");
    let source = html.find("print(1)").expect("code source must render");
    let stream = html
        .find("<pre class=\"output-stream\">1\n</pre>")
        .expect("stream output must render");

    assert!(
        heading < prompt && prompt < source && source < stream,
        "Cell pieces must appear in document order"
    );
}

#[test]
fn test_notebook_cell_count_preserved_through_render() {
    let json = r#"{"cells":[
        {"cell_type":"markdown","source":"one"},
        {"cell_type":"raw","source":"two"},
        {"cell_type":"code","source":"three","outputs":[]}
    ]}"#;

    let doc = parse_notebook_from_str(json).unwrap();
    assert_eq!(doc.cells.len(), 3);

    let body = render_notebook_body(&doc);
    assert_eq!(
        body.matches("<section class=\"cell").count(),
        3,
        "Every cell must produce exactly one section"
    );
}

#[test]
fn test_injection_safety_on_markdown_path() {
    let html = render_markdown("# <script>alert('x')</script>");
    assert!(
        !html.contains("<script>"),
        "Markdown path must never emit raw script tags: {html}"
    );
}

#[test]
fn test_display_data_priority_end_to_end() {
    let json = r#"{"cells":[{"cell_type":"code","source":"plot()","outputs":[{
        "output_type":"display_data",
        "data":{"image/png":"aWltZw==","text/plain":"<Figure>"}
    }]}]}"#;

    let doc = parse_notebook_from_str(json).unwrap();
    let html = render_notebook_body(&doc);
    assert!(html.contains("data:image/png;base64,aWltZw=="));
    assert!(
        !html.contains("Figure"),
        "Plain-text fallback must not render next to the image: {html}"
    );
}

#[test]
fn test_traceback_ansi_stripped_end_to_end() {
    let json = r#"{"cells":[{"cell_type":"code","source":"1/0","outputs":[{
        "output_type":"error",
        "traceback":["\u001b[0;31mZeroDivisionError\u001b[0m: division by zero"]
    }]}]}"#;

    let doc = parse_notebook_from_str(json).unwrap();
    let html = render_notebook_body(&doc);
    assert!(html.contains("ZeroDivisionError"));
    assert!(
        !html.contains('\u{1b}'),
        "ANSI escapes must not survive rendering"
    );
}

// ========================================
// Guide packaging contract
// ========================================

#[test]
fn test_guide_doctype_passthrough_is_byte_identical() {
    let original = "<!DOCTYPE html>\n<html><head><title>G</title></head><body>x</body></html>";
    assert_eq!(package_guide(original, "G"), original);
}

#[test]
fn test_guide_fragment_wrap_contains_original() {
    let fragment = "<h2>Risk models</h2>";
    let wrapped = package_guide(fragment, "Risk models");
    assert_ne!(wrapped, fragment);
    assert!(wrapped.contains(fragment));
    assert!(wrapped.starts_with("<!DOCTYPE html>"));
}

// ========================================
// CSV previewer properties
// ========================================

#[test]
fn test_csv_seventy_five_rows_capped_at_fifty() {
    let mut content = String::from("a,b,c\n");
    for i in 0..75 {
        content.push_str(&format!("{i},{},{}\n", i * 2, i * 3));
    }

    let preview = parse_csv_preview(&content).unwrap();
    assert_eq!(preview.headers, vec!["a", "b", "c"]);
    assert_eq!(preview.rows.len(), 50);
    assert_eq!(preview.total_row_count, 75);
    assert_eq!(preview.summary(), "showing 50 of 75 rows");
}

#[test]
fn test_csv_header_only_file() {
    let preview = parse_csv_preview("a,b,c").unwrap();
    assert_eq!(preview.rows.len(), 0);
    assert_eq!(preview.total_row_count, 0);
}

#[test]
fn test_csv_empty_input_errors() {
    assert!(matches!(
        parse_csv_preview(""),
        Err(ViewerError::Parse(_))
    ));
}

// ========================================
// Viewer over an object store
// ========================================

#[test]
fn test_viewer_full_flow_from_store() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("model-files")).unwrap();
    fs::write(
        dir.path().join("model-files/returns.csv"),
        "date,ret\n2025-01-02,0.01\n2025-01-03,-0.004\n",
    )
    .unwrap();

    let viewer = FileViewer::new(FsObjectStore::new(dir.path()));
    let record = quantview_core::FileRecord {
        name: "returns.csv".to_string(),
        size: 44,
        mime_type_hint: Some("text/csv".to_string()),
        description: "Daily returns".to_string(),
        uploader_display_name: "Ada".to_string(),
        created_at: chrono::Utc::now(),
        bucket: "model-files".to_string(),
        storage_path: "returns.csv".to_string(),
    };

    match viewer.preview(&record).unwrap() {
        Preview::Tabular(preview) => {
            assert_eq!(preview.headers, vec!["date", "ret"]);
            assert_eq!(preview.total_row_count, 2);
            assert!(!preview.is_truncated());
        }
        other => panic!("Expected tabular preview, got {other:?}"),
    }

    let html = viewer.export(&record).unwrap();
    assert!(html.contains("<td>2025-01-02</td>"));
    assert!(html.ends_with("</html>\n"));
}

#[test]
fn test_two_views_are_independent() {
    // Each view fetches its own copy; a rewrite between views is visible
    // to the second view only.
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("b")).unwrap();
    let path = dir.path().join("b/data.csv");
    fs::write(&path, "a\n1\n").unwrap();

    let viewer = FileViewer::new(FsObjectStore::new(dir.path()));
    let record = quantview_core::FileRecord {
        name: "data.csv".to_string(),
        size: 4,
        mime_type_hint: None,
        description: String::new(),
        uploader_display_name: "Ada".to_string(),
        created_at: chrono::Utc::now(),
        bucket: "b".to_string(),
        storage_path: "data.csv".to_string(),
    };

    let Preview::Tabular(first) = viewer.preview(&record).unwrap() else {
        panic!("expected tabular");
    };
    assert_eq!(first.total_row_count, 1);

    fs::write(&path, "a\n1\n2\n").unwrap();

    let Preview::Tabular(second) = viewer.preview(&record).unwrap() else {
        panic!("expected tabular");
    };
    assert_eq!(second.total_row_count, 2, "No caching between views");
}
