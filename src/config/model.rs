// src/config/model.rs

use serde::Deserialize;

/// Top-level configuration as read from `config.toml`.
///
/// ```toml
/// [snippet]
/// template = """
/// \\begin{figure}[ht]
///     \\centering
///     \\incfig{{name}}
///     \\caption{{title}}
///     \\label{fig:{name}}
/// \\end{figure}"""
///
/// [picker]
/// command = "rofi -dmenu -i -p figure"
/// ```
///
/// All sections are optional and have defaults matching the built-in
/// behavior, so an absent file is equivalent to an empty one.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UserConfig {
    /// Include-snippet template from `[snippet]`.
    #[serde(default)]
    pub snippet: SnippetSection,

    /// External picker command from `[picker]`.
    #[serde(default)]
    pub picker: PickerSection,
}

/// `[snippet]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SnippetSection {
    /// Template with `{name}` and `{title}` placeholders.
    #[serde(default = "default_snippet_template")]
    pub template: String,
}

impl Default for SnippetSection {
    fn default() -> Self {
        Self {
            template: default_snippet_template(),
        }
    }
}

/// `[picker]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PickerSection {
    /// Line-oriented chooser command; figure names go in on stdin, the
    /// selected line comes back on stdout.
    #[serde(default = "default_picker_command")]
    pub command: String,
}

impl Default for PickerSection {
    fn default() -> Self {
        Self {
            command: default_picker_command(),
        }
    }
}

fn default_snippet_template() -> String {
    crate::export::snippet::DEFAULT_TEMPLATE.to_string()
}

fn default_picker_command() -> String {
    "rofi -dmenu -i -p figure".to_string()
}
