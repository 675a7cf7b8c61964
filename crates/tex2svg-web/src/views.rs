//! Page rendering

use minijinja::Environment;
use serde::Serialize;

const INDEX_TEMPLATE_NAME: &str = "index.html";
const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// Values shown on the conversion page
#[derive(Debug, Clone, Default, Serialize)]
pub struct IndexView {
    pub latex_snippet: String,
    pub template: String,
    /// Raw SVG markup, embedded unescaped
    pub svg_output: Option<String>,
    pub has_download: bool,
    pub error: Option<String>,
}

impl IndexView {
    /// A form with no result
    pub fn form(latex_snippet: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            latex_snippet: latex_snippet.into(),
            template: template.into(),
            ..Self::default()
        }
    }

    pub fn with_svg(mut self, svg: String) -> Self {
        self.svg_output = Some(svg);
        self.has_download = true;
        self
    }

    pub fn with_error(mut self, error: String) -> Self {
        self.error = Some(error);
        self
    }
}

/// Compiled page templates
///
/// `.html` templates are auto-escaped, so the snippet, the template text and
/// diagnostics are always shown as text.
#[derive(Debug)]
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(INDEX_TEMPLATE_NAME, INDEX_TEMPLATE)?;
        Ok(Self { env })
    }

    pub fn render_index(&self, view: &IndexView) -> Result<String, minijinja::Error> {
        self.env.get_template(INDEX_TEMPLATE_NAME)?.render(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_prefills_both_fields() {
        let views = Views::new().unwrap();
        let html = views
            .render_index(&IndexView::form("\\textbf{Hi}", "%%content%%"))
            .unwrap();

        assert!(html.contains("\\textbf{Hi}</textarea>"));
        assert!(html.contains("%%content%%</textarea>"));
        assert!(!html.contains("/download"));
        assert!(!html.contains("<pre"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let views = Views::new().unwrap();
        let html = views
            .render_index(&IndexView::form("</textarea><script>", "a & b"))
            .unwrap();

        assert!(!html.contains("</textarea><script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a &amp; b"));
    }

    #[test]
    fn test_svg_is_embedded_raw_with_download_link() {
        let views = Views::new().unwrap();
        let view = IndexView::form("x", "y").with_svg("<svg><circle/></svg>".to_string());
        let html = views.render_index(&view).unwrap();

        assert!(html.contains("<svg><circle/></svg>"));
        assert!(html.contains("href=\"/download\""));
    }

    #[test]
    fn test_error_is_shown_escaped_in_pre() {
        let views = Views::new().unwrap();
        let view = IndexView::form("x", "y")
            .with_error("Error during conversion:\n! Undefined <control>".to_string());
        let html = views.render_index(&view).unwrap();

        assert!(html.contains("Error during conversion:\n! Undefined &lt;control&gt;"));
        assert!(!html.contains("/download"));
    }
}
