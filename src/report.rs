use std::{
    fmt::{Display, Write},
    ops::Range,
};

use annotate_snippets::{Level, Renderer, Snippet};
use bstr::ByteSlice;

use crate::{labels, Cause, Error, Location};

/// Where `err` was created, if it knows.
pub fn location(err: &Error) -> Option<&Location> {
    err.as_cause()
        .and_then(Cause::as_located)
        .and_then(|located| located.location())
}

/// The file and line `err` was created at, `None` if it wasn't recorded.
pub fn file_and_line(err: &Error) -> Option<(&str, u32)> {
    location(err).map(|location| (location.file(), location.line()))
}

/// A multi-line description of `err`: where it happened, its message, and one
/// `Caused by:` line for every error it wraps. Mainly useful for logging.
pub fn detailed_error(err: &Error) -> String {
    let mut msg = String::new();
    if let Some((file, line)) = file_and_line(err) {
        let _ = write!(msg, "({file}:{line}) ");
    }
    let _ = write!(msg, "{err}");
    for cause in err.chain().skip(1) {
        let _ = write!(msg, "\nCaused by: {cause}");
    }
    msg
}

/// Renders `err` as a diagnostic: the message as the title, the line of code that
/// created it (when the source file can be read), its labels and its causes.
pub fn report(err: &Error) -> Report<'_> {
    Report { error: err }
}

pub struct Report<'a> {
    error: &'a Error,
}

impl Display for Report<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let title = self.error.to_string();
        let origin = location(self.error).map(ToString::to_string);
        let source = location(self.error).and_then(|location| {
            let source = read_source(location)?;
            let span = line_span(&source, location.line())?;
            Some((source, span))
        });
        let labels = labels(self.error);
        let labels = (!labels.is_empty()).then(|| format!("labels: {}", labels.join(", ")));
        let causes: Vec<String> = self
            .error
            .chain()
            .skip(1)
            .map(|cause| format!("caused by: {cause}"))
            .collect();

        let mut message = Level::Error.title(&title);
        match (&source, &origin) {
            (Some((source, span)), Some(origin)) => {
                message = message.snippet(
                    Snippet::source(source)
                        .origin(origin)
                        .fold(true)
                        .annotation(Level::Error.span(span.clone()).label("created here")),
                );
            }
            (None, Some(origin)) => {
                message = message.footer(Level::Note.title(origin));
            }
            _ => {}
        }
        if let Some(labels) = &labels {
            message = message.footer(Level::Help.title(labels));
        }
        message = message.footers(causes.iter().map(|cause| Level::Note.title(cause)));

        let renderer = if colored::control::SHOULD_COLORIZE.should_colorize() {
            Renderer::styled()
        } else {
            Renderer::plain()
        };
        let res = write!(f, "{}", renderer.render(message));
        res
    }
}

fn read_source(location: &Location) -> Option<String> {
    let bytes = std::fs::read(location.path()).ok()?;
    Some(bytes.to_str_lossy().into_owned())
}

/// Byte range of the 1-based `line` in `source`, leading indentation excluded.
fn line_span(source: &str, line: u32) -> Option<Range<usize>> {
    let index = usize::try_from(line).ok()?.checked_sub(1)?;
    let mut start = 0;
    for (i, text) in source.split_inclusive('\n').enumerate() {
        if i == index {
            let text = text.trim_end_matches(['\n', '\r']);
            let indent = text.len() - text.trim_start().len();
            return Some(start + indent..start + text.len());
        }
        start += text.len();
    }
    None
}
