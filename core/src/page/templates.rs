use super::context::{IndexContext, RenderContext};
use crate::error::CoreResult;
use crate::render::escape_html;
use crate::validator::ValidationResult;

/// The templating collaborator: turns page contexts into HTML documents.
///
/// `RenderContext::data` and `ValidationResult::result` are already HTML and
/// must be inserted verbatim; every other string is plain text.
pub trait Templates {
    fn render_community(&self, ctx: &RenderContext) -> CoreResult<String>;
    fn render_index(&self, ctx: &IndexContext) -> CoreResult<String>;
}

#[derive(Debug, Clone, Default)]
pub struct HtmlTemplates {
    pub site_title: Option<String>,
}

impl HtmlTemplates {
    fn title(&self) -> &str {
        self.site_title.as_deref().unwrap_or("Community API directory")
    }
}

impl Templates for HtmlTemplates {
    fn render_community(&self, ctx: &RenderContext) -> CoreResult<String> {
        let (lat, lon) = ctx.latlon;
        let mut body = Vec::new();
        body.push(format!("<h1>{}</h1>", escape_html(&ctx.community)));
        body.push(format!(
            r#"<p class="meta">API file: {} (version {})</p>"#,
            external_link(&ctx.url),
            escape_html(&ctx.api)
        ));
        body.push(validation_block(ctx.validation.as_ref()));
        body.push(format!(
            r#"<iframe class="map" src="https://www.openstreetmap.org/export/embed.html?bbox={}&amp;layer=mapnik&amp;marker={}%2C{}"></iframe>"#,
            ctx.bbox.url_param(),
            lat,
            lon
        ));
        body.push(format!(r#"<section class="data">{}</section>"#, ctx.data));
        body.push(format!(
            r#"<footer>Generated {} · <a href="index.html">All communities</a></footer>"#,
            escape_html(&ctx.now)
        ));

        Ok(document(
            &format!("{} · {}", ctx.community, self.title()),
            &body.join("\n"),
        ))
    }

    fn render_index(&self, ctx: &IndexContext) -> CoreResult<String> {
        let mut body = Vec::new();
        body.push(format!("<h1>{}</h1>", escape_html(self.title())));
        body.push(format!(
            "<p class=\"meta\">{} communities</p>",
            ctx.communities.len()
        ));
        body.push("<table class=\"communities\">".to_string());
        body.push("<tr><th>Community</th><th>API</th><th>Status</th></tr>".to_string());
        for entry in &ctx.communities {
            body.push(format!(
                r#"<tr><td><a href="{}">{}</a></td><td>{}</td><td>{}</td></tr>"#,
                escape_html(&entry.page),
                escape_html(&entry.community),
                escape_html(&entry.api),
                status_badge(entry.validation.as_ref())
            ));
        }
        body.push("</table>".to_string());
        body.push(format!("<footer>Generated {}</footer>", escape_html(&ctx.now)));

        Ok(document(self.title(), &body.join("\n")))
    }
}

// Only http(s) targets become links; anything else is shown as text.
fn external_link(url: &str) -> String {
    let lower = url.trim_start().to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        format!(
            r#"<a href="{url}" rel="noopener">{url}</a>"#,
            url = escape_html(url)
        )
    } else {
        escape_html(url)
    }
}

fn status_badge(validation: Option<&ValidationResult>) -> String {
    match validation {
        Some(v) => format!(
            r#"<span class="status status-{}">{}</span>"#,
            v.status.as_str(),
            escape_html(&v.status_text)
        ),
        None => r#"<span class="status status-unknown">Unknown</span>"#.to_string(),
    }
}

fn validation_block(validation: Option<&ValidationResult>) -> String {
    let details = match validation {
        Some(v) if !v.result.is_empty() => format!(r#"<div class="details">{}</div>"#, v.result),
        _ => String::new(),
    };
    format!(
        r#"<div class="validation">{}{}</div>"#,
        status_badge(validation),
        details
    )
}

fn document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<link rel=\"stylesheet\" href=\"style.css\">\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        body
    )
}
