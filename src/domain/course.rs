use std::{borrow::Borrow, fmt, ops::Deref, str::FromStr};

use non_empty_string::NonEmptyString;

/// The number of characters in every course number.
pub const COURSE_NUMBER_LEN: usize = 7;

/// A validated course number, exactly seven characters long (e.g. `CSCI200`).
///
/// Course numbers are compared lexicographically, which is the order courses
/// are listed in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CourseNumber(String);

impl CourseNumber {
    /// Creates a new `CourseNumber` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCourseNumber`] if the string is not exactly
    /// [`COURSE_NUMBER_LEN`] characters long.
    pub fn new(s: String) -> Result<Self, InvalidCourseNumber> {
        if s.chars().count() != COURSE_NUMBER_LEN {
            return Err(InvalidCourseNumber(s));
        }
        Ok(Self(s))
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CourseNumber {
    type Error = InvalidCourseNumber;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for CourseNumber {
    type Error = InvalidCourseNumber;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl FromStr for CourseNumber {
    type Err = InvalidCourseNumber;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl AsRef<str> for CourseNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CourseNumber {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Deref for CourseNumber {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for CourseNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error returned when a string is not a valid course number.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid course number '{0}': must be exactly 7 characters")]
pub struct InvalidCourseNumber(String);

impl InvalidCourseNumber {
    /// The rejected input.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

/// A course in the catalogue.
///
/// Prerequisites are kept as plain strings in the order they appear in the
/// source. They are only checked for existence once the whole catalogue has
/// been read, so a prerequisite may name a course that is defined later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    number: CourseNumber,
    title: NonEmptyString,
    prerequisites: Vec<String>,
}

impl Course {
    /// Creates a course from pre-validated parts.
    #[must_use]
    pub const fn new(number: CourseNumber, title: NonEmptyString, prerequisites: Vec<String>) -> Self {
        Self {
            number,
            title,
            prerequisites,
        }
    }

    /// The unique course number.
    #[must_use]
    pub const fn number(&self) -> &CourseNumber {
        &self.number
    }

    /// The display title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Prerequisite course numbers, in source order.
    #[must_use]
    pub fn prerequisites(&self) -> &[String] {
        &self.prerequisites
    }

    /// Returns a displayable one-line summary, `NUMBER, Title`.
    #[must_use]
    pub const fn summary(&self) -> Summary<'_> {
        Summary(self)
    }

    /// Returns a displayable multi-line view including prerequisites.
    #[must_use]
    pub const fn details(&self) -> Details<'_> {
        Details(self)
    }
}

/// One-line summary of a [`Course`], returned by [`Course::summary`].
#[derive(Debug, Clone, Copy)]
pub struct Summary<'a>(&'a Course);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}, {}", self.0.number, self.0.title)
    }
}

/// Detailed view of a [`Course`], returned by [`Course::details`].
///
/// The prerequisites line is omitted when the course has none.
#[derive(Debug, Clone, Copy)]
pub struct Details<'a>(&'a Course);

impl fmt::Display for Details<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.summary())?;
        if !self.0.prerequisites.is_empty() {
            write!(f, "\nPrerequisites: {}", self.0.prerequisites.join(", "))?;
        }
        Ok(())
    }
}
