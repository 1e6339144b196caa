use std::{
    fmt::{Debug, Display},
    sync::OnceLock,
};

use crate::{Cause, Error, Wrappable};

/// Stands in for the first error it holds, and treats every error as if it were
/// wrapped by the one before it.
///
/// Only ever created by [`wrap`] and by unwrapping, never empty when created that way.
#[derive(Clone)]
pub(crate) struct WrappedErrors {
    errors: Vec<Error>,
    next: OnceLock<Option<Error>>,
}

/// Wraps `causes` in `err`.
///
/// Errors that know how to wrap (see [`Wrappable`]) do it themselves. Anything else is
/// put in front of `causes` in a new aggregate that acts like `err`.
pub fn wrap(err: Error, causes: impl IntoIterator<Item = Error>) -> Error {
    let causes: Vec<Error> = causes.into_iter().collect();
    if causes.is_empty() {
        return err;
    }
    if let Some(wrappable) = err.as_cause().and_then(Cause::as_wrappable) {
        return wrappable.wrap(causes);
    }
    let mut errors = Vec::with_capacity(causes.len() + 1);
    errors.push(err);
    errors.extend(causes);
    Error::from_cause(WrappedErrors::new(errors))
}

impl WrappedErrors {
    pub(crate) fn new(errors: Vec<Error>) -> Self {
        Self {
            errors,
            next: OnceLock::new(),
        }
    }

    /// The only error held, if there is exactly one.
    pub(crate) fn single(&self) -> Option<&Error> {
        match self.errors.as_slice() {
            [single] => Some(single),
            _ => None,
        }
    }

    fn head(&self) -> &Error {
        match self.errors.first() {
            Some(head) => head,
            None => panic!("wrapped errors undefined state: no wrapped errors"),
        }
    }

    /// The rest of the chain, computed once.
    ///
    /// The head's own causes come first; the siblings after it are only reached once
    /// the head has nothing left to unwrap.
    fn next(&self) -> Option<&Error> {
        self.next
            .get_or_init(|| match self.errors.as_slice() {
                [] => panic!("wrapped errors undefined state: no wrapped errors"),
                [single] => Some(single.clone()),
                [_, second] => Some(second.clone()),
                [head, rest @ ..] => {
                    let mut errors = Vec::with_capacity(self.errors.len());
                    if let Some(deeper) = head.unwrap_cause() {
                        errors.push(deeper);
                    }
                    errors.extend(rest.iter().cloned());
                    Some(Error::from_cause(WrappedErrors::new(errors)))
                }
            })
            .as_ref()
    }
}

impl Display for WrappedErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self.head(), f)
    }
}

impl Debug for WrappedErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.errors.iter().map(ToString::to_string))
            .finish()
    }
}

impl std::error::Error for WrappedErrors {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.next().map(|e| e as &(dyn std::error::Error + 'static))
    }
}

impl Cause for WrappedErrors {
    fn unwrap_cause(&self) -> Option<Error> {
        self.next().cloned()
    }

    fn is(&self, target: &Error) -> bool {
        self.errors.iter().any(|e| crate::is(e, target))
    }

    fn as_wrappable(&self) -> Option<&dyn Wrappable> {
        Some(self)
    }
}

impl Wrappable for WrappedErrors {
    fn wrap(&self, causes: Vec<Error>) -> Error {
        let mut errors = self.errors.clone();
        errors.extend(causes);
        Error::from_cause(WrappedErrors::new(errors))
    }
}
