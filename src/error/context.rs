use crate::{detailed_error, labels, location, ContextualError, Error, Location};

/// Adds context to the error of a `Result`.
pub trait Context<T> {
    /// Wraps the error in a new [`ContextualError`] created at the caller.
    fn context<M: Into<String>>(self, msg: M) -> Result<T, Error>;

    /// Like [`context`](Self::context), but only builds the message on failure.
    fn with_context<M: Into<String>>(self, f: impl FnOnce() -> M) -> Result<T, Error>;

    /// Attaches `labels` to the error, if it can carry labels.
    fn labeled<I, S>(self, labels: I) -> Result<T, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>;

    /// Emits the error's details as a `tracing` event and passes the result on.
    fn log_err(self) -> Result<T, Error>;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T> for Result<T, E> {
    #[track_caller]
    fn context<M: Into<String>>(self, msg: M) -> Result<T, Error> {
        let location = Location::here();
        self.map_err(|e| ContextualError::at(msg, location).wrap([Error::new(e)]).into())
    }

    #[track_caller]
    fn with_context<M: Into<String>>(self, f: impl FnOnce() -> M) -> Result<T, Error> {
        let location = Location::here();
        self.map_err(|e| ContextualError::at(f(), location).wrap([Error::new(e)]).into())
    }

    fn labeled<I, S>(self, labels: I) -> Result<T, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.map_err(|e| crate::with(Error::new(e), labels))
    }

    fn log_err(self) -> Result<T, Error> {
        self.map_err(|e| {
            let error = Error::new(e);
            let at = location(&error).map_or_else(String::new, ToString::to_string);
            tracing::error!(location = %at, labels = ?labels(&error), "{}", detailed_error(&error));
            error
        })
    }
}
