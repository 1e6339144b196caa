use std::{fmt::Display, path::Path};

/// The place in the source code where an error was created.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Location {
    file: String,
    line: u32,
    column: u32,
}

impl std::fmt::Debug for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl Default for Location {
    fn default() -> Self {
        Self {
            file: String::new(),
            line: 0,
            column: 0,
        }
    }
}

impl Location {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// The location of whoever called the `#[track_caller]` function this is used in.
    #[track_caller]
    pub fn here() -> Self {
        std::panic::Location::caller().into()
    }

    /// A dummy location is what we store when no caller information was available.
    pub fn is_dummy(&self) -> bool {
        self == &Self::default()
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn path(&self) -> &Path {
        Path::new(&self.file)
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    /// Two locations are the same origin if they point at the same line of the same file.
    /// Columns are ignored, several errors created on one line are considered equivalent.
    pub fn same_origin(&self, other: &Self) -> bool {
        self.file == other.file && self.line == other.line
    }
}

impl From<&std::panic::Location<'_>> for Location {
    fn from(value: &std::panic::Location<'_>) -> Self {
        Self {
            file: value.file().to_owned(),
            line: value.line(),
            column: value.column(),
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_dummy() {
            return write!(f, "DUMMY_LOCATION");
        }
        let Self { file, line, column } = self;
        write!(f, "{file}:{line}:{column}")
    }
}

/// Errors that know where they were created.
pub trait Located {
    fn location(&self) -> Option<&Location>;
}
