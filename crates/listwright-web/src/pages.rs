//! Server-rendered HTML pages.
//!
//! User input is always escaped. Generated Markdown is rendered to HTML with
//! any raw HTML it contains shown as text.

use html_escape::{encode_double_quoted_attribute, encode_text};
use pulldown_cmark::{html, Event, Options, Parser};
use serde::Deserialize;

/// Fields of the manual optimization form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManualForm {
    /// Current title
    #[serde(default)]
    pub title: String,
    /// Current bullet points
    #[serde(default)]
    pub bullets: String,
    /// Current description
    #[serde(default)]
    pub description: String,
    /// Reviews / voice of customer
    #[serde(default)]
    pub reviews: String,
    /// Target keywords
    #[serde(default)]
    pub keywords: String,
    /// Category
    #[serde(default)]
    pub category: String,
    /// Target audience
    #[serde(default)]
    pub audience: String,
}

/// Fields of the batch optimization form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchForm {
    /// ASINs or product URLs, one per line
    #[serde(default)]
    pub identifiers: String,
    /// Target keywords
    #[serde(default)]
    pub keywords: String,
    /// Category
    #[serde(default)]
    pub category: String,
    /// Target audience
    #[serde(default)]
    pub audience: String,
}

/// Generated texts of a manual run, as carried by the page
#[derive(Debug, Clone, Default)]
pub struct ManualOutput {
    /// Raw audit Markdown
    pub audit: String,
    /// Raw rewrite Markdown
    pub rewrite: String,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    Manual,
    Batch,
}

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 1100px; margin: 2rem auto; padding: 0 1rem; color: #1f2933; }
nav a { margin-right: 1rem; text-decoration: none; padding: .4rem .8rem; border-radius: 6px; }
nav a.active { background: #1f2933; color: #fff; }
form label { display: block; margin-top: .8rem; font-weight: 600; }
textarea, input[type=text] { width: 100%; box-sizing: border-box; font: inherit; padding: .4rem; }
button { margin-top: 1rem; padding: .5rem 1.2rem; font: inherit; cursor: pointer; }
.result { border: 1px solid #d9e2ec; border-radius: 8px; padding: 1rem; margin-top: 1rem; }
.error { border-color: #e12d39; background: #fff5f5; }
"#;

/// Render Markdown to HTML
///
/// Listing text and model output are untrusted, so embedded HTML is escaped.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) => Event::Text(raw),
        other => other,
    });
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

fn layout(title: &str, tab: Tab, body: &str) -> String {
    let class = |t: Tab| if t == tab { "active" } else { "" };
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{style}</style>\n</head>\n<body>\n\
         <h1>Listwright</h1>\n\
         <p>Audit and rewrite marketplace listings.</p>\n\
         <nav><a class=\"{manual}\" href=\"/\">Manual listing</a>\
         <a class=\"{batch}\" href=\"/batch\">ASIN / URL batch</a></nav>\n\
         {body}\n</body>\n</html>\n",
        title = encode_text(title),
        style = STYLE,
        manual = class(Tab::Manual),
        batch = class(Tab::Batch),
        body = body,
    )
}

fn textarea(name: &str, label: &str, value: &str, rows: u32) -> String {
    format!(
        "<label for=\"{name}\">{label}</label>\n\
         <textarea id=\"{name}\" name=\"{name}\" rows=\"{rows}\">{value}</textarea>\n",
        name = name,
        label = label,
        rows = rows,
        value = encode_text(value),
    )
}

fn text_input(name: &str, label: &str, value: &str) -> String {
    format!(
        "<label for=\"{name}\">{label}</label>\n\
         <input type=\"text\" id=\"{name}\" name=\"{name}\" value=\"{value}\">\n",
        name = name,
        label = label,
        value = encode_double_quoted_attribute(value),
    )
}

fn hidden(name: &str, value: &str) -> String {
    format!(
        "<input type=\"hidden\" name=\"{}\" value=\"{}\">\n",
        name,
        encode_double_quoted_attribute(value)
    )
}

fn targeting_inputs(keywords: &str, category: &str, audience: &str) -> String {
    let mut html = String::from("<h2>🎯 Targeting</h2>\n");
    html.push_str(&text_input("keywords", "Target keywords (comma-separated)", keywords));
    html.push_str(&text_input("category", "Category", category));
    html.push_str(&text_input("audience", "Target audience", audience));
    html
}

/// Manual tab: the form, plus results when a run has completed
pub fn manual_page(form: &ManualForm, output: Option<&ManualOutput>) -> String {
    let mut body = String::from("<form method=\"post\" action=\"/optimize/manual\">\n");
    body.push_str("<h2>✍️ Listing Inputs</h2>\n");
    body.push_str(&text_input("title", "Current title", &form.title));
    body.push_str(&textarea("bullets", "Current bullet points", &form.bullets, 6));
    body.push_str(&textarea("description", "Current description", &form.description, 6));
    body.push_str(&textarea("reviews", "Reviews / voice of customer (optional)", &form.reviews, 4));
    body.push_str(&targeting_inputs(&form.keywords, &form.category, &form.audience));
    body.push_str("<button type=\"submit\">🚀 Optimize listing</button>\n</form>\n");

    if let Some(output) = output {
        body.push_str("<h2>📊 Results</h2>\n");
        body.push_str("<section class=\"result\">\n<h3>🔍 AI Audit</h3>\n");
        body.push_str(&markdown_to_html(&output.audit));
        body.push_str("</section>\n<section class=\"result\">\n<h3>✏️ Optimized Listing</h3>\n");
        body.push_str(&markdown_to_html(&output.rewrite));
        body.push_str("</section>\n");

        body.push_str("<form method=\"post\" action=\"/export/manual\">\n");
        body.push_str(&hidden("audit", &output.audit));
        body.push_str(&hidden("rewrite", &output.rewrite));
        body.push_str("<button type=\"submit\">📥 Export manual result</button>\n</form>\n");
    }

    layout("Listwright: manual listing", Tab::Manual, &body)
}

/// Batch tab: the form, plus the rendered report when a run has completed
pub fn batch_page(form: &BatchForm, report: Option<&str>) -> String {
    let mut body = String::from("<form method=\"post\" action=\"/optimize/batch\">\n");
    body.push_str("<h2>🔗 ASIN / URL Inputs</h2>\n");
    body.push_str(&textarea(
        "identifiers",
        "ASINs or Amazon URLs (one per line)",
        &form.identifiers,
        8,
    ));
    body.push_str(&targeting_inputs(&form.keywords, &form.category, &form.audience));
    body.push_str("<button type=\"submit\">🚀 Optimize batch</button>\n</form>\n");

    if let Some(report) = report {
        body.push_str("<h2>📊 Batch Results</h2>\n<section class=\"result\">\n");
        body.push_str(&markdown_to_html(report));
        body.push_str("</section>\n");

        body.push_str("<form method=\"post\" action=\"/export/batch\">\n");
        body.push_str(&hidden("report", report));
        body.push_str("<button type=\"submit\">📥 Export batch results</button>\n</form>\n");
    }

    layout("Listwright: batch", Tab::Batch, &body)
}

/// Readable error page; `message` is escaped, never rendered as markup
pub fn error_page(heading: &str, message: &str, back: &str) -> String {
    let tab = if back == "/batch" { Tab::Batch } else { Tab::Manual };
    let body = format!(
        "<section class=\"result error\">\n<h2>❌ {}</h2>\n<pre>{}</pre>\n</section>\n\
         <p><a href=\"{}\">Back</a></p>\n",
        encode_text(heading),
        encode_text(message),
        encode_double_quoted_attribute(back),
    );
    layout("Listwright: error", tab, &body)
}
