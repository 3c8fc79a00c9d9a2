//! HTML templates for the review surface.

use crate::models::ExtractionResult;
use crate::utils::{format_size, html_escape};

use super::session::ReviewSession;

/// Base HTML shell.
pub fn base_template(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - invocr</title>
    <link rel="stylesheet" href="/static/style.css">
</head>
<body>
    <header id="main-header">
        <nav>
            <a href="/" class="logo">invocr</a>
        </nav>
    </header>
    <main>
        <h1>{}</h1>
        {}
    </main>
</body>
</html>"#,
        html_escape(title),
        html_escape(title),
        content
    )
}

/// Render the review page for one session.
pub fn review_page(session: &ReviewSession, default_endpoint: &str) -> String {
    let mut content = String::new();

    if let Some(error) = &session.error {
        content.push_str(&format!(
            r#"<div class="error">{}</div>"#,
            html_escape(error)
        ));
    }

    content.push_str(&upload_section(session));
    content.push_str(&preview_section(session));
    content.push_str(&extract_section(session, default_endpoint));

    if let Some(result) = &session.result {
        content.push_str(&result_section(result));
    }

    base_template("Invoice OCR review", &content)
}

fn upload_section(session: &ReviewSession) -> String {
    format!(
        r#"
        <div class="panel">
            <h2>1. Upload a scanned invoice or bill</h2>
            <form method="post" action="/upload" enctype="multipart/form-data">
                <input type="hidden" name="session" value="{}">
                <input type="file" name="file" accept=".pdf,.png,.jpg,.jpeg,.webp,.tif,.tiff" required>
                <button type="submit">Upload</button>
            </form>
            <p class="hint">PDF or image. For PDFs, only page 1 is sent for extraction.</p>
        </div>"#,
        session.id
    )
}

fn preview_section(session: &ReviewSession) -> String {
    let Some(document) = &session.document else {
        return String::new();
    };

    let caption = match &session.preview {
        Some(preview) if preview.mime_type == "image/png" && document.file_name != preview.file_name => {
            // Rasterized PDF: the preview differs from what was uploaded.
            format!(
                "{} ({}) - page 1 shown",
                html_escape(&document.file_name),
                format_size(document.bytes.len() as u64)
            )
        }
        _ => format!(
            "{} ({})",
            html_escape(&document.file_name),
            format_size(document.bytes.len() as u64)
        ),
    };

    let image = if session.preview.is_some() {
        format!(
            r#"<img src="/preview/{}" alt="document preview">"#,
            session.id
        )
    } else {
        r#"<p class="hint">No preview available.</p>"#.to_string()
    };

    format!(
        r#"
        <div class="panel preview">
            <h2>2. Preview</h2>
            <p>{}</p>
            {}
        </div>"#,
        caption, image
    )
}

fn extract_section(session: &ReviewSession, default_endpoint: &str) -> String {
    format!(
        r#"
        <div class="panel">
            <h2>3. Extract</h2>
            <form method="post" action="/extract">
                <input type="hidden" name="session" value="{}">
                <label>OCR endpoint base URL
                    <input type="text" name="endpoint" value="{}">
                </label>
                <button type="submit">Extract text</button>
            </form>
            <p class="hint">Ensure the inference server is running and exposes /ocr.</p>
        </div>"#,
        session.id,
        html_escape(session.endpoint(default_endpoint))
    )
}

fn result_section(result: &ExtractionResult) -> String {
    let raw_pretty =
        serde_json::to_string_pretty(&result.raw).unwrap_or_else(|_| result.raw.to_string());

    let text_block = if result.text.is_empty() {
        r#"<p class="hint">Extraction completed but returned empty text.</p>"#.to_string()
    } else {
        format!(
            r#"<pre class="extracted">{}</pre>"#,
            html_escape(&result.text)
        )
    };

    format!(
        r#"
        <div class="panel">
            <h2>Extracted text</h2>
            <p class="hint">extracted at {}</p>
            {}
            <h2>Raw response</h2>
            <pre class="raw">{}</pre>
        </div>"#,
        result.extracted_at.format("%Y-%m-%d %H:%M:%S UTC"),
        text_block,
        html_escape(&raw_pretty)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UploadedDocument;
    use uuid::Uuid;

    #[test]
    fn test_empty_session_renders_upload_form() {
        let session = ReviewSession::new(Uuid::new_v4());
        let html = review_page(&session, "http://127.0.0.1:7861");

        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains(r#"action="/upload""#));
        assert!(html.contains("http://127.0.0.1:7861"));
        assert!(!html.contains("Extracted text"));
    }

    #[test]
    fn test_result_and_error_render_together() {
        let mut session = ReviewSession::new(Uuid::new_v4());
        session.document = Some(UploadedDocument::new(
            Some("invoice.png".into()),
            Some("image/png".into()),
            vec![1, 2, 3],
        ));
        session.result = Some(ExtractionResult::new(
            "INVOICE #123".to_string(),
            serde_json::json!({"text": "INVOICE #123"}),
        ));
        session.error = Some("OCR endpoint unreachable: refused".to_string());

        let html = review_page(&session, "http://127.0.0.1:7861");
        // A failed retry never wipes the previous result off the page.
        assert!(html.contains("INVOICE #123"));
        assert!(html.contains("OCR endpoint unreachable"));
    }

    #[test]
    fn test_extracted_text_is_escaped() {
        let mut session = ReviewSession::new(Uuid::new_v4());
        session.result = Some(ExtractionResult::new(
            "<script>alert(1)</script>".to_string(),
            serde_json::json!({}),
        ));

        let html = review_page(&session, "http://127.0.0.1:7861");
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
