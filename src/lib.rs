//! Error values that remember where they were created, carry free-form labels and
//! can wrap any number of other errors.

mod error;
mod labels;
mod location;
mod report;

pub use error::*;
pub use labels::*;
pub use location::*;
pub use report::*;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Creates a plain error from format arguments.
#[macro_export]
macro_rules! format_err {
    ($($arg:tt)*) => {
        $crate::string(format!($($arg)*))
    };
}

/// Returns early with a [`ContextualError`] located at the macro invocation.
#[macro_export]
macro_rules! bail {
    ($msg:expr) => {
        return Err($crate::ContextualError::new(format!($msg)).into());
    };

    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::ContextualError::new(format!($fmt, $($arg)*)).into());
    };
}

/// Bails with the given message unless `cond` holds.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($arg:tt)*) => {
        if !$cond {
            $crate::bail!($($arg)*);
        }
    };
}
