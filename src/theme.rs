pub use colored::{Color, Colorize};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColorScheme {
    pub foreground: Option<ColorWrapper>,
    pub bold: bool,
    pub italic: bool,
}

// Color has no serde support of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct ColorWrapper(Color);

impl From<ColorWrapper> for String {
    fn from(wrapper: ColorWrapper) -> Self {
        format!("{:?}", wrapper.0)
    }
}

impl From<String> for ColorWrapper {
    fn from(s: String) -> Self {
        ColorWrapper(Color::from_str(&s).unwrap_or(Color::White))
    }
}

impl ColorScheme {
    fn fg(color: Color) -> Self {
        Self {
            foreground: Some(ColorWrapper(color)),
            ..Default::default()
        }
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn apply(&self, text: &str) -> colored::ColoredString {
        let mut colored_text: colored::ColoredString = text.into();

        if let Some(fg) = &self.foreground {
            colored_text = colored_text.color(fg.0);
        }
        if self.bold {
            colored_text = colored_text.bold();
        }
        if self.italic {
            colored_text = colored_text.italic();
        }

        colored_text
    }
}

/// Styles for the parts of a diagnostic response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub header: ColorScheme,
    pub heading: ColorScheme,
    pub code: ColorScheme,
    pub step: ColorScheme,
    pub urgent: ColorScheme,
    pub muted: ColorScheme,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            header: ColorScheme::fg(Color::Blue).bold(),
            heading: ColorScheme::fg(Color::Yellow).bold(),
            code: ColorScheme::fg(Color::Cyan),
            step: ColorScheme::fg(Color::Green),
            urgent: ColorScheme::fg(Color::Red).bold(),
            muted: ColorScheme::fg(Color::BrightBlack).italic(),
        }
    }

    pub fn light() -> Self {
        Self {
            header: ColorScheme::fg(Color::BrightBlue).bold(),
            heading: ColorScheme::fg(Color::Magenta).bold(),
            code: ColorScheme::fg(Color::Blue),
            step: ColorScheme::fg(Color::BrightGreen),
            urgent: ColorScheme::fg(Color::BrightRed).bold(),
            muted: ColorScheme::default().italic(),
        }
    }

    pub fn monochrome() -> Self {
        Self {
            header: ColorScheme::default().bold(),
            heading: ColorScheme::default().bold(),
            code: ColorScheme::default(),
            step: ColorScheme::default(),
            urgent: ColorScheme::default().bold(),
            muted: ColorScheme::default(),
        }
    }
}
