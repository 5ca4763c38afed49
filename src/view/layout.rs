use maud::{DOCTYPE, Markup, html};

use crate::HTMX_PATH;
use crate::model::FieldError;

const NAV: [(&str, &str); 7] = [
    ("/", "Home"),
    ("/shot_advice", "Shot Advice"),
    ("/swing_analysis", "Swing Analysis"),
    ("/rounds", "Rounds"),
    ("/courses", "Courses"),
    ("/view_yardages", "Yardages"),
    ("/achievements", "Achievements"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    fn css_class(self) -> &'static str {
        match self {
            NoticeLevel::Info => "notice notice-info",
            NoticeLevel::Success => "notice notice-success",
            NoticeLevel::Warning => "notice notice-warning",
            NoticeLevel::Error => "notice notice-error",
        }
    }
}

/// A one-line message shown above the page content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

impl From<&FieldError> for Notice {
    fn from(err: &FieldError) -> Self {
        Notice::warning(err.message.clone())
    }
}

#[must_use]
pub fn render_notices(notices: &[Notice]) -> Markup {
    html! {
        @if !notices.is_empty() {
            div class="notices" {
                @for notice in notices {
                    p class=(notice.level.css_class()) { (notice.message) }
                }
            }
        }
    }
}

/// The full page shell shared by every screen.
#[must_use]
pub fn render_page(title: &str, notices: &[Notice], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                link rel="stylesheet" type="text/css" href="/static/styles.css";
                title { (title) " | Golf Caddie" }
                script src=(HTMX_PATH) {}
            }
            body {
                nav class="topnav" {
                    @for (href, label) in NAV {
                        a href=(href) { (label) }
                    }
                }
                main {
                    h1 { (title) }
                    (render_notices(notices))
                    (content)
                }
            }
        }
    }
}

/// Message for a field, if the field was rejected.
#[must_use]
pub fn field_error<'a>(errors: &'a [FieldError], field: &str) -> Option<&'a str> {
    errors
        .iter()
        .find(|e| e.field == field)
        .map(|e| e.message.as_str())
}
