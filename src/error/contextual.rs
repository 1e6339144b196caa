use std::fmt::{Debug, Display};

use super::WrappedErrors;
use crate::{Cause, Error, Labelable, Located, Location, Wrappable};

/// An error carrying a message, the location it was created at, a list of labels and
/// optionally the errors that caused it.
///
/// This is a plain value: [`with`](Self::with) and [`wrap`](Self::wrap) hand back a new
/// error, so anyone still holding the previous one never sees the change.
#[derive(Clone)]
pub struct ContextualError {
    message: String,
    wrapped: Option<Error>,
    location: Location,
    labels: Vec<String>,
}

/// Creates a [`ContextualError`] located at the caller and wraps `causes` in it.
#[track_caller]
pub fn new(message: impl Into<String>, causes: impl IntoIterator<Item = Error>) -> Error {
    ContextualError::new(message).wrap(causes).into()
}

impl ContextualError {
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self::at(message, Location::here())
    }

    /// Creates the error with an explicit location instead of the caller's.
    pub fn at(message: impl Into<String>, location: Location) -> Self {
        Self {
            message: message.into(),
            wrapped: None,
            location,
            labels: vec![],
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// `None` if no location was captured.
    pub fn location(&self) -> Option<&Location> {
        (!self.location.is_dummy()).then_some(&self.location)
    }

    /// Appends `labels` to the ones already attached.
    pub fn with<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels.extend(labels.into_iter().map(Into::into));
        self
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn labeled_by(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Adds `causes` to the errors wrapped by this one.
    pub fn wrap(mut self, causes: impl IntoIterator<Item = Error>) -> Self {
        let causes: Vec<Error> = causes.into_iter().collect();
        if causes.is_empty() {
            return self;
        }
        self.wrapped = Some(match self.wrapped.take() {
            None => Error::from_cause(WrappedErrors::new(causes)),
            Some(wrapped) => crate::wrap(wrapped, causes),
        });
        self
    }

    /// One level of the cause chain. A single wrapped error is handed out directly
    /// rather than through the aggregate holding it.
    pub fn unwrap_cause(&self) -> Option<Error> {
        let wrapped = self.wrapped.as_ref()?;
        match wrapped.downcast_ref::<WrappedErrors>().and_then(WrappedErrors::single) {
            Some(single) => Some(single.clone()),
            None => Some(wrapped.clone()),
        }
    }

    /// True if `target` is a [`ContextualError`] equivalent to this one or to one of
    /// the errors it wraps.
    pub fn is(&self, target: &Error) -> bool {
        let Some(other) = target.downcast_ref::<ContextualError>() else {
            return false;
        };
        self.equivalent(other) || self.wrapped.as_ref().is_some_and(|w| crate::is(w, target))
    }

    /// Same message created at the same file and line. Labels and causes are ignored.
    pub fn equivalent(&self, other: &Self) -> bool {
        self.message == other.message && self.location.same_origin(&other.location)
    }
}

impl Display for ContextualError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl Debug for ContextualError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextualError")
            .field("message", &self.message)
            .field("location", &self.location)
            .field("labels", &self.labels)
            .field("wrapped", &self.wrapped.as_ref().map(ToString::to_string))
            .finish()
    }
}

impl std::error::Error for ContextualError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        let wrapped = self.wrapped.as_ref()?;
        let source = wrapped
            .downcast_ref::<WrappedErrors>()
            .and_then(WrappedErrors::single)
            .unwrap_or(wrapped);
        Some(source as &(dyn std::error::Error + 'static))
    }
}

impl Cause for ContextualError {
    fn unwrap_cause(&self) -> Option<Error> {
        ContextualError::unwrap_cause(self)
    }

    /// Only this link. [`crate::is`] walks the causes itself and asks each of them.
    fn is(&self, target: &Error) -> bool {
        target
            .downcast_ref::<ContextualError>()
            .is_some_and(|other| self.equivalent(other))
    }

    fn as_wrappable(&self) -> Option<&dyn Wrappable> {
        Some(self)
    }

    fn as_labelable(&self) -> Option<&dyn Labelable> {
        Some(self)
    }

    fn as_located(&self) -> Option<&dyn Located> {
        Some(self)
    }
}

impl Wrappable for ContextualError {
    fn wrap(&self, causes: Vec<Error>) -> Error {
        ContextualError::wrap(self.clone(), causes).into()
    }
}

impl Labelable for ContextualError {
    fn with(&self, labels: Vec<String>) -> Error {
        ContextualError::with(self.clone(), labels).into()
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl Located for ContextualError {
    fn location(&self) -> Option<&Location> {
        ContextualError::location(self)
    }
}
