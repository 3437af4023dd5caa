use crate::pagination::IndexPage;
use crate::title::DEFAULT_TITLE;
use crate::types::Post;

pub const TITLE_PLACEHOLDER: &str = "TITLE_TO_REPLACE";
pub const CONTENT_PLACEHOLDER: &str = "<!-- CONTENTS -->";
pub const STYLES_PLACEHOLDER: &str = "/* STYLES */";

const POST_SEPARATOR: &str = "<hr />";
const PREVIOUS_LABEL: &str = "&lt;&lt;&lt;";
const NEXT_LABEL: &str = "&gt;&gt;&gt;";

#[derive(Debug, Clone)]
pub struct Template {
    source: String,
}

impl Template {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn render(&self, title: &str, body: &str, css: &str) -> String {
        self.source
            .replacen(TITLE_PLACEHOLDER, title, 1)
            .replacen(CONTENT_PLACEHOLDER, body, 1)
            .replacen(STYLES_PLACEHOLDER, css, 1)
    }

    pub fn render_styles(&self, css: &str) -> String {
        self.source.replacen(STYLES_PLACEHOLDER, css, 1)
    }
}

pub fn post_page(template: &Template, post: &Post, css: &str) -> String {
    template.render(&post.title, &post.rendered_html, css)
}

pub fn index_page(template: &Template, page: &IndexPage, posts: &[Post], css: &str) -> String {
    let mut body = combined_posts(page.slice(posts).unwrap_or_default());
    body.push_str(&pagination_buttons(page));
    template.render(DEFAULT_TITLE, &body, css)
}

pub fn not_found_page(template: &Template, css: &str) -> String {
    template.render_styles(css)
}

fn combined_posts(posts: &[Post]) -> String {
    posts
        .iter()
        .map(|post| format!("<article>{}</article>", post.rendered_html))
        .collect::<Vec<_>>()
        .join(POST_SEPARATOR)
}

// A button without a target stays in the markup, hidden, pointing at the
// current page.
pub fn pagination_buttons(page: &IndexPage) -> String {
    format!(
        r#"<div class="pagination-buttons">{}{}</div>"#,
        nav_button(page.previous, page.number, PREVIOUS_LABEL),
        nav_button(page.next, page.number, NEXT_LABEL)
    )
}

fn nav_button(target: Option<usize>, current: usize, label: &str) -> String {
    let (visibility, href) = match target {
        Some(number) => ("visible", number),
        None => ("hidden", current),
    };
    format!(r#"<a style="visibility: {visibility}" href="/page/{href}">{label}</a>"#)
}
