//! Text view model produced by the screens.

use std::fmt;

use crate::router::{Navigator, TABS};

/// One visible piece of a screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// Screen heading
    Title(String),
    /// Plain text
    Text(String),
    /// Text input with its current (possibly masked) value
    Input { label: String, value: String },
    /// Inline error under a field
    FieldError(String),
    /// Form level error message
    Error(String),
    /// Form level success message
    Success(String),
    /// Activity indicator
    Progress,
    /// Submit control
    Button { label: String, enabled: bool },
    /// Navigation link
    Link { label: String, path: String },
}

/// Everything a screen shows, top to bottom.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct View {
    /// Header bar title, if the screen has a header
    pub header: Option<String>,
    pub elements: Vec<Element>,
}

impl View {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, header: &str) -> Self {
        self.header = Some(header.to_string());
        self
    }

    pub fn push(&mut self, element: Element) -> &mut Self {
        self.elements.push(element);
        self
    }

    /// Whether any element shows `text`
    pub fn contains_text(&self, text: &str) -> bool {
        self.to_string().contains(text)
    }

    /// Append the tab bar, marking the active tab
    pub fn with_tab_bar(mut self, navigator: &Navigator) -> Self {
        let active = navigator.active_tab();
        let labels: Vec<String> = TABS
            .iter()
            .map(|tab| {
                if active == Some(tab) {
                    format!("[{}]", tab.label)
                } else {
                    tab.label.to_string()
                }
            })
            .collect();
        self.elements.push(Element::Text(labels.join(" | ")));
        self
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Title(text) => write!(f, "== {} ==", text),
            Element::Text(text) => f.write_str(text),
            Element::Input { label, value } => write!(f, "{}: {}", label, value),
            Element::FieldError(text) => write!(f, "  ! {}", text),
            Element::Error(text) => write!(f, "error: {}", text),
            Element::Success(text) => write!(f, "ok: {}", text),
            Element::Progress => f.write_str("..."),
            Element::Button { label, enabled } => {
                if *enabled {
                    write!(f, "[ {} ]", label)
                } else {
                    write!(f, "[ {} ] (disabled)", label)
                }
            }
            Element::Link { label, path } => write!(f, "<{}> -> {}", label, path),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(header) = &self.header {
            writeln!(f, "# {}", header)?;
        }
        for element in &self.elements {
            writeln!(f, "{}", element)?;
        }
        Ok(())
    }
}
