// src/export/snippet.rs

//! Include-snippet rendering.
//!
//! After every export the snippet for including the figure in a document is
//! rendered and handed to the clipboard, so it can be pasted straight into
//! the text being written.

/// Built-in LaTeX include snippet.
///
/// `{name}` is the figure file stem, `{title}` the beautified caption.
pub const DEFAULT_TEMPLATE: &str = "\\begin{figure}[ht]\n    \\centering\n    \\incfig{{name}}\n    \\caption{{title}}\n    \\label{fig:{name}}\n\\end{figure}";

/// Turn a figure file stem into a human-readable title.
///
/// Separators become spaces and each word is title-cased, so
/// `some-figure_name` renders as `Some Figure Name`.
pub fn beautify(name: &str) -> String {
    name.replace(['_', '-'], " ")
        .split(' ')
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
        }
        None => String::new(),
    }
}

/// Indent every line of `text` by `indentation` spaces.
pub fn indent(text: &str, indentation: usize) -> String {
    text.split('\n')
        .map(|line| format!("{}{}", " ".repeat(indentation), line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pluggable include-snippet template.
#[derive(Debug, Clone)]
pub struct SnippetTemplate {
    template: String,
}

impl Default for SnippetTemplate {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

impl SnippetTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Render for a figure stem, deriving the title via [`beautify`].
    pub fn render(&self, name: &str) -> String {
        self.render_titled(name, &beautify(name))
    }

    /// Render with an explicit title (used by `create`, where the title is
    /// what the user typed).
    pub fn render_titled(&self, name: &str, title: &str) -> String {
        self.template
            .replace("{name}", name)
            .replace("{title}", title)
    }
}
