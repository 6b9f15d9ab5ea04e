//! Borrowed description of a single emission
//!
//! The facade builds nothing; each sink receives an [`Event`] through the
//! provided methods of [`Sink`](super::sink::Sink) and renders it itself.

use super::color::ColorCode;
use super::message::LogKind;
use std::borrow::Cow;
use std::fmt;

/// Message text before interpolation
pub enum Body<'a> {
    /// Output of `format_args!`
    Args(fmt::Arguments<'a>),
    /// Already final text
    Text(Cow<'a, str>),
    /// `{}` placeholders in `template` are filled with `words`, each
    /// painted in `color`
    Highlight {
        template: &'a str,
        words: &'a [&'a dyn fmt::Display],
        color: ColorCode,
    },
}

impl Body<'_> {
    /// Interpolate the body
    ///
    /// `resume` is an escape sequence written after every highlighted word so
    /// a sink that colors the whole line can switch back to its line color.
    pub fn render(&self, resume: Option<&str>) -> String {
        match self {
            Body::Args(args) => fmt::format(*args),
            Body::Text(text) => text.to_string(),
            Body::Highlight {
                template,
                words,
                color,
            } => {
                let painted = words.iter().map(|word| {
                    let mut out = color.paint(&word.to_string());
                    if let Some(resume) = resume {
                        out.push_str(resume);
                    }
                    out
                });
                interpolate(template, painted)
            }
        }
    }
}

/// Replace successive `{}` placeholders with `words`
///
/// Surplus placeholders are kept verbatim, surplus words are ignored.
pub fn interpolate<I, S>(template: &str, words: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut words = words.into_iter();
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find("{}") {
        out.push_str(&rest[..pos]);
        match words.next() {
            Some(word) => out.push_str(word.as_ref()),
            None => out.push_str("{}"),
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    out
}

pub struct Event<'a> {
    pub kind: LogKind,
    /// Empty when the emission has no icon
    pub icon: &'a str,
    pub body: Body<'a>,
    pub is_task: bool,
    /// Task completion, or a fatal call
    pub is_complete: bool,
}

impl<'a> Event<'a> {
    pub fn new(kind: LogKind, icon: &'a str, body: Body<'a>) -> Self {
        Self {
            kind,
            icon,
            body,
            is_task: false,
            is_complete: false,
        }
    }

    pub fn task(mut self, complete: bool) -> Self {
        self.is_task = true;
        self.is_complete = complete;
        self
    }

    pub fn completing(mut self) -> Self {
        self.is_complete = true;
        self
    }

    /// Interpolated text without any highlight resume sequence
    pub fn message(&self) -> String {
        self.body.render(None)
    }
}
