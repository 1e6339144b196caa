use crate::{Cause, Error};

/// Errors that can be tagged with free-form labels.
pub trait Labelable {
    /// Returns a new error with `labels` appended to the existing ones.
    fn with(&self, labels: Vec<String>) -> Error;

    fn labels(&self) -> &[String];

    fn labeled_by(&self, label: &str) -> bool {
        self.labels().iter().any(|l| l == label)
    }
}

fn labelable(err: &Error) -> Option<&dyn Labelable> {
    err.as_cause().and_then(Cause::as_labelable)
}

/// Attaches `labels` to `err`. Errors that can't carry labels are returned as is.
pub fn with<I, S>(err: Error, labels: I) -> Error
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    match labelable(&err) {
        Some(labelable) => labelable.with(labels.into_iter().map(Into::into).collect()),
        None => err,
    }
}

/// The labels attached to `err`, empty for errors that can't carry any.
pub fn labels(err: &Error) -> &[String] {
    labelable(err).map(Labelable::labels).unwrap_or_default()
}

pub fn labeled_by(err: &Error, label: &str) -> bool {
    labelable(err).is_some_and(|l| l.labeled_by(label))
}

/// Whether `err` carries at least one of `labels`.
pub fn labeled_by_any<I, S>(err: &Error, labels: I) -> bool
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let Some(labelable) = labelable(err) else {
        return false;
    };
    labels
        .into_iter()
        .any(|label| labelable.labeled_by(label.as_ref()))
}
