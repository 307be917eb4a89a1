//! Canvas export to clean HTML.
//!
//! The clean fragment keeps only block content (plus outer spacing); the
//! editing wrapper, the move/delete affordances, and the empty-state
//! placeholder never reach the output.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::markup::{common_style_css, escape, render_content};
use crate::Canvas;

/// MIME type of the exported document.
pub const HTML_MIME: &str = "text/html";

/// Base stylesheet embedded in every exported document.
const BASE_STYLESHEET: &str = "        body {
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 1200px;
            margin: 0 auto;
            padding: 20px;
        }
        img {
            max-width: 100%;
            height: auto;
        }
";

/// Configuration for document export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Document `<title>` (default: `My Website`).
    pub title: String,
    /// Suggested download file name (default: `my-website.html`).
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            title: "My Website".to_string(),
            file_name: "my-website.html".to_string(),
        }
    }
}

/// A file offered to the user as a client-side download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Download {
    /// Suggested file name.
    pub file_name: String,
    /// MIME type.
    pub mime: String,
    /// File contents.
    pub body: String,
}

/// Exports a [`Canvas`] to an HTML fragment or a standalone document.
#[derive(Debug, Clone, Default)]
pub struct PageExporter {
    config: ExportConfig,
}

impl PageExporter {
    /// Create a new exporter with the given configuration.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportConfig::default())
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// The canvas content with all editing decoration stripped, in canvas order.
    #[must_use]
    pub fn clean_export(&self, canvas: &Canvas) -> String {
        clean_export(canvas)
    }

    /// A complete standalone HTML document wrapping [`Self::clean_export`].
    #[must_use]
    pub fn full_document(&self, canvas: &Canvas) -> String {
        let mut doc = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        doc.push_str("    <meta charset=\"UTF-8\">\n");
        doc.push_str(
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        let _ = writeln!(doc, "    <title>{}</title>", escape(&self.config.title));
        doc.push_str("    <style>\n");
        doc.push_str(BASE_STYLESHEET);
        doc.push_str("    </style>\n</head>\n<body>\n");
        doc.push_str(&self.clean_export(canvas));
        doc.push_str("\n</body>\n</html>\n");
        doc
    }

    /// The full document packaged as a download.
    #[must_use]
    pub fn download(&self, canvas: &Canvas) -> Download {
        Download {
            file_name: self.config.file_name.clone(),
            mime: HTML_MIME.to_string(),
            body: self.full_document(canvas),
        }
    }
}

/// The canvas content with all editing decoration stripped.
///
/// Each element becomes a plain `<div>` around its content; outer spacing set
/// through the properties form is kept as an inline style.
#[must_use]
pub fn clean_export(canvas: &Canvas) -> String {
    let mut out = String::new();
    for element in canvas.elements() {
        let style = common_style_css(element);
        if style.is_empty() {
            out.push_str("<div>");
        } else {
            let _ = write!(out, "<div style=\"{style}\">");
        }
        out.push_str(&render_content(&element.content));
        out.push_str("</div>");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Element, ElementId, ElementType};

    fn canvas_with(types: &[ElementType]) -> Canvas {
        let mut canvas = Canvas::new();
        for (n, ty) in types.iter().enumerate() {
            canvas.append(Element::new(ElementId::from_parts(7, n as u64 + 1), *ty));
        }
        canvas
    }

    #[test]
    fn test_empty_canvas_exports_nothing() {
        assert_eq!(clean_export(&Canvas::new()), "");
    }

    #[test]
    fn test_clean_export_keeps_order_and_content_only() {
        let mut canvas = canvas_with(&[ElementType::Heading, ElementType::Spacer]);
        let first = ElementId::from_parts(7, 1);
        canvas.select(&first).expect("select");
        assert_eq!(
            clean_export(&canvas),
            "<div><h2>Heading Text</h2></div><div><div style=\"height:50px;\"></div></div>"
        );
    }

    #[test]
    fn test_clean_export_keeps_outer_spacing() {
        let mut canvas = canvas_with(&[ElementType::Divider]);
        let id = ElementId::from_parts(7, 1);
        if let Some(element) = canvas.get_mut(&id) {
            element.common_style.margin_px = 12;
            element.common_style.padding_px = 4;
        }
        assert!(clean_export(&canvas).starts_with("<div style=\"margin:12px 0;padding:4px;\"><hr"));
    }

    #[test]
    fn test_full_document_shell() {
        let canvas = canvas_with(&[ElementType::Button]);
        let doc = PageExporter::with_defaults().full_document(&canvas);
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<meta charset=\"UTF-8\">"));
        assert!(doc.contains("name=\"viewport\""));
        assert!(doc.contains("<title>My Website</title>"));
        assert!(doc.contains("line-height: 1.6;"));
        assert!(doc.contains("<body>\n<div><button"));
        assert!(doc.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_download_uses_configured_name() {
        let exporter = PageExporter::new(ExportConfig {
            title: "Launch <Day>".to_string(),
            file_name: "launch.html".to_string(),
        });
        let download = exporter.download(&Canvas::new());
        assert_eq!(download.file_name, "launch.html");
        assert_eq!(download.mime, "text/html");
        assert!(download.body.contains("<title>Launch &lt;Day&gt;</title>"));
    }
}
