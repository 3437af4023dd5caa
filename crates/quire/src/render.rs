use pulldown_cmark::{Options, Parser};
use regex::{Captures, Regex};
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

const HIGHLIGHT_CLASS: &str = "hljs";
const LANGUAGE_CLASS_PREFIX: &str = "language-";
const CODE_BLOCK_PATTERN: &str = r"(?s)<pre><code([^>]*)>(.*?)</code></pre>";
const CLASS_ATTRIBUTE_PATTERN: &str = r#"class="([^"]*)""#;

pub struct ContentRenderer {
    syntax_set: SyntaxSet,
    code_block: Regex,
    class_attribute: Regex,
}

impl Default for ContentRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentRenderer {
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            code_block: Regex::new(CODE_BLOCK_PATTERN).expect("code block pattern is valid"),
            class_attribute: Regex::new(CLASS_ATTRIBUTE_PATTERN)
                .expect("class attribute pattern is valid"),
        }
    }

    pub fn render(&self, markdown: &str) -> String {
        let html = markdown_to_html(markdown);
        let html = unescape_entities(&html);
        self.highlight_code_blocks(html.trim_end())
    }

    fn highlight_code_blocks(&self, html: &str) -> String {
        self.code_block
            .replace_all(html, |captures: &Captures| {
                let attributes = &captures[1];
                let escaped_code = &captures[2];
                self.highlight_block(attributes, escaped_code)
                    .unwrap_or_else(|| captures[0].to_string())
            })
            .into_owned()
    }

    fn highlight_block(&self, attributes: &str, escaped_code: &str) -> Option<String> {
        let language = self
            .class_attribute
            .captures(attributes)
            .and_then(|captures| {
                captures
                    .get(1)?
                    .as_str()
                    .split_whitespace()
                    .find_map(|class| class.strip_prefix(LANGUAGE_CLASS_PREFIX))
                    .map(str::to_string)
            });

        let code = decode_code_entities(escaped_code);
        let syntax = self.detect_syntax(language.as_deref(), &code)?;
        let highlighted = self.highlight(&code, syntax)?;

        Some(format!(
            "<pre><code{}>{}</code></pre>",
            self.mark_highlighted(attributes),
            highlighted
        ))
    }

    fn detect_syntax(&self, language: Option<&str>, code: &str) -> Option<&SyntaxReference> {
        language
            .and_then(|token| self.syntax_set.find_syntax_by_token(token))
            .or_else(|| self.syntax_set.find_syntax_by_first_line(code))
    }

    fn highlight(&self, code: &str, syntax: &SyntaxReference) -> Option<String> {
        let mut generator = ClassedHTMLGenerator::new_with_class_style(
            syntax,
            &self.syntax_set,
            ClassStyle::SpacedPrefixed { prefix: "hljs-" },
        );

        for line in LinesWithEndings::from(code) {
            if let Err(error) = generator.parse_html_for_line_which_includes_newline(line) {
                tracing::debug!(syntax = %syntax.name, %error, "highlighting failed, leaving block plain");
                return None;
            }
        }

        Some(generator.finalize())
    }

    fn mark_highlighted(&self, attributes: &str) -> String {
        if self.class_attribute.is_match(attributes) {
            self.class_attribute
                .replace(attributes, |captures: &Captures| {
                    format!("class=\"{HIGHLIGHT_CLASS} {}\"", &captures[1])
                })
                .into_owned()
        } else {
            format!(" class=\"{HIGHLIGHT_CLASS}\"{attributes}")
        }
    }
}

fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);
    let mut html = String::with_capacity(markdown.len() * 3 / 2);
    pulldown_cmark::html::push_html(&mut html, parser);
    html
}

// Applied to the whole document, prose included.
pub fn unescape_entities(html: &str) -> String {
    html.replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}

fn decode_code_entities(escaped: &str) -> String {
    escaped
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(markdown: &str) -> String {
        ContentRenderer::new().render(markdown)
    }

    #[test]
    fn test_renders_commonmark() {
        let output = render("# Hello\n\nThis is **bold** and *soft*.\n\n- one\n- two\n");
        assert!(output.contains("<h1>Hello</h1>"));
        assert!(output.contains("<strong>bold</strong>"));
        assert!(output.contains("<em>soft</em>"));
        assert!(output.contains("<li>one</li>"));
    }

    #[test]
    fn test_trims_trailing_whitespace() {
        let output = render("Paragraph\n\n\n");
        assert_eq!(output, "<p>Paragraph</p>");
    }

    #[test]
    fn test_unescapes_ampersands_and_quotes() {
        let output = render("Tom & Jerry said \"hi\"");
        assert_eq!(output, "<p>Tom & Jerry said \"hi\"</p>");
    }

    #[test]
    fn test_unescape_leaves_other_entities() {
        assert_eq!(
            unescape_entities("&lt;b&gt; &amp; &quot;x&quot; &#39;y&#39;"),
            "&lt;b&gt; & \"x\" 'y'"
        );
    }

    #[test]
    fn test_unescape_is_idempotent_on_converter_output() {
        let html = markdown_to_html("Salt & pepper, \"quoted\", it's <fine>");
        let once = unescape_entities(&html);
        let twice = unescape_entities(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_link_titles_survive_rendering() {
        let output = render("# [Fish & Chips](/fish-chips)");
        assert!(output.contains(r#"<a href="/fish-chips">Fish & Chips</a>"#));
    }

    #[test]
    fn test_highlights_tagged_code_block() {
        let output = render("```rust\nfn main() {}\n```");
        assert!(output.contains(r#"<pre><code class="hljs language-rust">"#));
        assert!(output.contains("<span class=\"hljs-"));
        assert!(output.contains("main"));
        assert!(output.ends_with("</code></pre>"));
    }

    #[test]
    fn test_untagged_block_detected_by_first_line_gets_hljs_class() {
        let output = render("```\n#!/bin/bash\necho hi\n```");
        assert!(output.contains(r#"<pre><code class="hljs">"#));
        assert!(output.contains("<span class=\"hljs-"));
    }

    #[test]
    fn test_unknown_language_left_plain() {
        let markdown = "```not-a-real-language\nplain < text\n```";
        let output = render(markdown);
        assert_eq!(
            output,
            "<pre><code class=\"language-not-a-real-language\">plain &lt; text\n</code></pre>"
        );
    }

    #[test]
    fn test_undetectable_untagged_block_left_plain() {
        let output = render("    just some words\n");
        assert_eq!(output, "<pre><code>just some words\n</code></pre>");
    }

    #[test]
    fn test_highlighting_escapes_markup_in_code() {
        let output = render("```html\n<div>&</div>\n```");
        assert!(!output.contains("<div>"));
        assert!(output.contains("&lt;"));
    }

    #[test]
    fn test_every_code_block_is_processed() {
        let output = render("```rust\nlet a = 1;\n```\n\ntext\n\n```python\nx = 2\n```");
        assert!(output.contains(r#"class="hljs language-rust""#));
        assert!(output.contains(r#"class="hljs language-python""#));
        assert!(output.contains("<p>text</p>"));
    }
}
