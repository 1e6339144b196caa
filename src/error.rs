use std::{
    fmt::{Debug, Display},
    sync::Arc,
};

use crate::{Labelable, Located};

mod context;
mod contextual;
mod wrapped;

pub use context::*;
pub use contextual::*;
pub use wrapped::wrap;
pub(crate) use wrapped::WrappedErrors;

pub(crate) type DynError = dyn std::error::Error + Send + Sync + 'static;

/// An error value: either an opaque error from anywhere in the ecosystem, or a value
/// that participates in the wrapping/labelling protocol through [`Cause`].
///
/// Cloning is cheap and shares the underlying allocation. Two handles are identical
/// (see [`Error::ptr_eq`]) exactly when one was cloned from the other.
#[derive(Clone)]
pub struct Error {
    repr: Repr,
}

#[derive(Clone)]
enum Repr {
    Opaque(Arc<DynError>),
    Aware(Arc<dyn Cause>),
}

/// The protocol an error type implements to be wrapped, labelled or located.
///
/// Every capability is optional, the provided methods report it as absent. A type opts
/// into a capability by returning `Some(self)` from the matching accessor.
pub trait Cause: AsDynError + std::error::Error + Send + Sync + 'static {
    /// One level of the cause chain.
    fn unwrap_cause(&self) -> Option<Error> {
        None
    }

    /// Whether this error considers itself to be `target`, beyond plain identity.
    fn is(&self, target: &Error) -> bool {
        let _ = target;
        false
    }

    fn as_wrappable(&self) -> Option<&dyn Wrappable> {
        None
    }

    fn as_labelable(&self) -> Option<&dyn Labelable> {
        None
    }

    fn as_located(&self) -> Option<&dyn Located> {
        None
    }
}

/// Errors that can hold further errors as their causes.
pub trait Wrappable {
    /// Returns a new error with `causes` appended to the ones already held.
    fn wrap(&self, causes: Vec<Error>) -> Error;
}

#[doc(hidden)]
pub trait AsDynError {
    fn as_dyn_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static);
}

impl<T: std::error::Error + Send + Sync + 'static> AsDynError for T {
    fn as_dyn_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self
    }
}

impl Error {
    /// Turns any error into an [`Error`]. Values that already are an [`Error`] or a
    /// [`ContextualError`] keep their identity and capabilities.
    pub fn new<E: std::error::Error + Send + Sync + 'static>(error: E) -> Self {
        let error: Box<DynError> = Box::new(error);
        match error.downcast::<Error>() {
            Ok(error) => *error,
            Err(error) => match error.downcast::<ContextualError>() {
                Ok(error) => Self::from_cause(*error),
                Err(error) => Self {
                    repr: Repr::Opaque(Arc::from(error)),
                },
            },
        }
    }

    pub fn from_cause<C: Cause>(cause: C) -> Self {
        Self {
            repr: Repr::Aware(Arc::new(cause)),
        }
    }

    /// A plain error that only carries a message.
    pub fn msg<T: Display + Send + Sync + 'static>(message: T) -> Self {
        Self {
            repr: Repr::Opaque(Arc::new(DisplayData(message))),
        }
    }

    /// Identity comparison: true if both handles point at the same error value.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.repr, &other.repr) {
            (Repr::Opaque(a), Repr::Opaque(b)) => {
                Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
            }
            (Repr::Aware(a), Repr::Aware(b)) => {
                Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
            }
            _ => false,
        }
    }

    /// The protocol view of this error, `None` for opaque errors.
    pub fn as_cause(&self) -> Option<&dyn Cause> {
        match &self.repr {
            Repr::Opaque(_) => None,
            Repr::Aware(cause) => Some(&**cause),
        }
    }

    pub fn downcast_ref<T: std::error::Error + 'static>(&self) -> Option<&T> {
        match &self.repr {
            Repr::Opaque(error) => error.downcast_ref(),
            Repr::Aware(cause) => (**cause).as_dyn_error().downcast_ref(),
        }
    }

    pub fn unwrap_cause(&self) -> Option<Error> {
        self.as_cause().and_then(Cause::unwrap_cause)
    }

    pub fn is(&self, target: &Error) -> bool {
        is(self, target)
    }

    /// The error itself followed by every step of unwrapping it.
    pub fn chain(&self) -> Chain {
        Chain(Some(self.clone()))
    }

    fn inner(&self) -> &DynError {
        match &self.repr {
            Repr::Opaque(error) => &**error,
            Repr::Aware(cause) => (**cause).as_dyn_error(),
        }
    }
}

pub struct Chain(Option<Error>);

impl Iterator for Chain {
    type Item = Error;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.0.take()?;
        self.0 = next.unwrap_cause();
        Some(next)
    }
}

/// Walks `err` and its causes, reporting whether any of them is `target`, either by
/// identity or because the error's own [`Cause::is`] says so.
pub fn is(err: &Error, target: &Error) -> bool {
    err.chain().any(|link| {
        link.ptr_eq(target) || link.as_cause().is_some_and(|cause| cause.is(target))
    })
}

/// Unwraps one level of `err`. Opaque errors have nothing to unwrap.
pub fn unwrap(err: &Error) -> Option<Error> {
    err.unwrap_cause()
}

/// The first error in the chain of `err` that is a `T`.
pub fn as_type<T: std::error::Error + Clone + 'static>(err: &Error) -> Option<T> {
    err.chain().find_map(|link| link.downcast_ref::<T>().cloned())
}

/// A plain error holding just `message`.
pub fn string(message: impl Into<String>) -> Error {
    Error::msg(message.into())
}

/// Iterates over `err` and everything it wraps.
pub fn chain(err: &Error) -> Chain {
    err.chain()
}

struct DisplayData<T: ?Sized>(T);

impl<T: Display + ?Sized> std::error::Error for DisplayData<T> {}

impl<T: Display + ?Sized> Display for DisplayData<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl<T: Display + ?Sized> Debug for DisplayData<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner().source()
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self.inner(), f)
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&crate::detailed_error(self))
    }
}

impl From<ContextualError> for Error {
    fn from(value: ContextualError) -> Self {
        Self::from_cause(value)
    }
}

impl From<anyhow::Error> for Error {
    fn from(value: anyhow::Error) -> Self {
        let error: Box<DynError> = value.into();
        Self {
            repr: Repr::Opaque(Arc::from(error)),
        }
    }
}

impl From<color_eyre::Report> for Error {
    fn from(value: color_eyre::Report) -> Self {
        let error: Box<DynError> = value.into();
        Self {
            repr: Repr::Opaque(Arc::from(error)),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::new(value)
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        string(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        string(value)
    }
}
