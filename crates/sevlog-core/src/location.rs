//! Call-site locations rendered in front of every line

use std::fmt;

/// Source location of a logging call
///
/// Rendered as `<parent-dir>:<file>:<line>: `, e.g. `src:main.rs:42: `.
/// Public write operations are `#[track_caller]`, so [`Location::caller`]
/// resolves to the user's call site no matter how many tracked wrappers
/// sit in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location<'a> {
    file: &'a str,
    line: u32,
}

impl<'a> Location<'a> {
    pub fn new(file: &'a str, line: u32) -> Self {
        Self { file, line }
    }

    /// Location of the (tracked) caller
    #[track_caller]
    pub fn caller() -> Location<'static> {
        std::panic::Location::caller().into()
    }

    pub fn file(&self) -> &'a str {
        self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// Final path component of the file, or `.` when empty
    pub fn file_name(&self) -> &'a str {
        let (_, name) = split_last(self.file);
        if name.is_empty() {
            "."
        } else {
            name
        }
    }

    /// Name of the directory containing the file, or `.` when there is none
    pub fn dir_name(&self) -> &'a str {
        let (dir, _) = split_last(self.file);
        match dir {
            Some(dir) => {
                let (_, name) = split_last(dir);
                if name.is_empty() {
                    "."
                } else {
                    name
                }
            }
            None => ".",
        }
    }
}

/// Split a path at its last separator, skipping trailing separators
fn split_last(path: &str) -> (Option<&str>, &str) {
    let trimmed = path.trim_end_matches(['/', '\\']);
    match trimmed.rfind(['/', '\\']) {
        Some(pos) => (Some(trimmed[..pos].trim_end_matches(['/', '\\'])), &trimmed[pos + 1..]),
        None => (None, trimmed),
    }
}

impl From<&'static std::panic::Location<'static>> for Location<'static> {
    fn from(loc: &'static std::panic::Location<'static>) -> Self {
        Self::new(loc.file(), loc.line())
    }
}

impl fmt::Display for Location<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}: ", self.dir_name(), self.file_name(), self.line)
    }
}
