//! Loading and validating a catalogue of courses.
//!
//! A [`Catalog`] is built in a single pass over delimited text, one course per
//! line:
//!
//! ```text
//! CSCI100,Introduction to Computer Science
//! CSCI200,Data Structures,CSCI101
//! CSCI101,Introduction to Programming in C++,CSCI100
//! ```
//!
//! Fields may be quoted, so a title can contain the delimiter. Prerequisites
//! are only checked once every line has been read, so a course may reference
//! one that is defined further down the file.

use std::{
    fs, io,
    path::{Path, PathBuf},
    str::FromStr,
};

use csv::StringRecord;
use non_empty_string::NonEmptyString;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::domain::{Course, CourseNumber, CourseTree, PrerequisiteSet, tree::DuplicateCourse};

/// The field delimiter used when none is configured.
pub const DEFAULT_DELIMITER: u8 = b',';

const BYTE_ORDER_MARK: &[u8] = b"\xef\xbb\xbf";

/// Errors that can occur while loading a catalogue.
///
/// Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The course-number field is not exactly seven characters.
    #[error("line {line}: invalid course number '{number}': must be exactly 7 characters")]
    MalformedCourseNumber {
        /// Line of the offending record.
        line: u64,
        /// The rejected field.
        number: String,
    },

    /// The title field is missing or empty.
    #[error("line {line}: course {number} has an empty title")]
    EmptyTitle {
        /// Line of the offending record.
        line: u64,
        /// The course whose title is missing.
        number: CourseNumber,
    },

    /// The same course number appears on more than one line.
    #[error("line {line}: course {number} is defined more than once")]
    DuplicateCourseNumber {
        /// Line of the repeated definition.
        line: u64,
        /// The repeated course number.
        number: CourseNumber,
    },

    /// A prerequisite names a course that is not in the catalogue.
    #[error("prerequisite course {0} does not exist")]
    UnknownPrerequisite(String),

    /// A record could not be decoded, for example because it is not UTF-8.
    #[error("{0}")]
    InvalidRecord(#[from] csv::Error),

    /// The catalogue file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    FileInaccessible {
        /// The path that was requested.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// A validated set of courses.
///
/// Every prerequisite of every course in a `Catalog` is itself a course in the
/// catalogue. A catalogue that fails that check is never handed out.
#[derive(Debug, Default)]
pub struct Catalog {
    courses: CourseTree,
    prerequisites: PrerequisiteSet,
}

impl Catalog {
    /// Reads and parses the catalogue file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::FileInaccessible`] if the file cannot be read, or
    /// any error from [`Catalog::parse`].
    #[instrument(level = "debug")]
    pub fn load(path: &Path, delimiter: u8) -> Result<Self, LoadError> {
        let bytes = fs::read(path).map_err(|source| LoadError::FileInaccessible {
            path: path.to_path_buf(),
            source,
        })?;
        Self::read(&bytes, delimiter)
    }

    /// Parses a catalogue from delimited text.
    ///
    /// Blank lines are skipped, as is a leading byte-order mark. Line endings
    /// may be `\n` or `\r\n`, and empty prerequisite fields are ignored.
    ///
    /// # Errors
    ///
    /// The first malformed line aborts the load. Once every line is read, the
    /// first prerequisite (in ascending order) that is not a course in the
    /// catalogue fails with [`LoadError::UnknownPrerequisite`].
    #[instrument(level = "debug", skip(text))]
    pub fn parse(text: &str, delimiter: u8) -> Result<Self, LoadError> {
        Self::read(text.as_bytes(), delimiter)
    }

    fn read(bytes: &[u8], delimiter: u8) -> Result<Self, LoadError> {
        let bytes = bytes.strip_prefix(BYTE_ORDER_MARK).unwrap_or(bytes);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::None)
            .delimiter(delimiter)
            .from_reader(bytes);

        let mut courses = CourseTree::new();
        let mut prerequisites = PrerequisiteSet::new();

        for record in reader.records() {
            let record = record?;
            if is_blank(&record) {
                continue;
            }

            let line = record.position().map_or(0, csv::Position::line);
            let course = parse_course(&record, line)?;
            prerequisites.extend(course.prerequisites().iter().cloned());
            courses
                .insert(course)
                .map_err(|DuplicateCourse(number)| LoadError::DuplicateCourseNumber { line, number })?;
        }

        let catalog = Self {
            courses,
            prerequisites,
        };
        catalog.validate()?;

        debug!(
            courses = catalog.len(),
            prerequisites = catalog.prerequisites.len(),
            "catalogue loaded"
        );
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), LoadError> {
        if let Some(missing) = self
            .prerequisites
            .iter()
            .find(|number| !self.courses.contains(number))
        {
            warn!(prerequisite = missing, "prerequisite course does not exist");
            return Err(LoadError::UnknownPrerequisite(missing.to_string()));
        }
        Ok(())
    }

    /// Finds the course with exactly this number.
    #[must_use]
    pub fn search(&self, number: &str) -> Option<&Course> {
        self.courses.search(number)
    }

    /// Returns `true` if the catalogue contains this course.
    #[must_use]
    pub fn contains(&self, number: &str) -> bool {
        self.courses.contains(number)
    }

    /// Iterates over the courses in ascending course-number order.
    #[must_use]
    pub fn iter(&self) -> crate::domain::tree::Iter<'_> {
        self.courses.iter()
    }

    /// The number of courses loaded.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.courses.len()
    }

    /// Returns `true` if no courses were loaded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// The distinct prerequisites referenced by the catalogue.
    #[must_use]
    pub const fn prerequisites(&self) -> &PrerequisiteSet {
        &self.prerequisites
    }
}

impl FromStr for Catalog {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, DEFAULT_DELIMITER)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Course;
    type IntoIter = crate::domain::tree::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A line holding nothing but whitespace comes through as a single field.
fn is_blank(record: &StringRecord) -> bool {
    record.len() <= 1 && record.iter().all(|field| field.trim().is_empty())
}

fn parse_course(record: &StringRecord, line: u64) -> Result<Course, LoadError> {
    let number = record.get(0).unwrap_or_default();
    let number = CourseNumber::new(number.to_string())
        .map_err(|e| LoadError::MalformedCourseNumber {
            line,
            number: e.value().to_string(),
        })?;

    let title = record.get(1).unwrap_or_default();
    let Ok(title) = NonEmptyString::new(title.to_string()) else {
        return Err(LoadError::EmptyTitle { line, number });
    };

    let prerequisites = record
        .iter()
        .skip(2)
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(ToString::to_string)
        .collect();

    Ok(Course::new(number, title, prerequisites))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use test_case::test_case;

    use super::*;

    const SAMPLE: &str = "\
CSCI100,Introduction to Computer Science
CSCI101,Introduction to Programming in C++,CSCI100
CSCI200,Data Structures,CSCI101
MATH201,Discrete Mathematics
CSCI300,Introduction to Algorithms,CSCI200,MATH201
CSCI301,Advanced Programming in C++,CSCI101
CSCI350,Operating Systems,CSCI300
CSCI400,Large Software Development,CSCI301,CSCI350
";

    fn numbers(catalog: &Catalog) -> Vec<&str> {
        catalog.iter().map(|c| c.number().as_str()).collect()
    }

    #[test]
    fn loads_two_courses_end_to_end() {
        let catalog: Catalog = "CSCI101,Intro to CS\nCSCI201,Data Structures,CSCI101\n"
            .parse()
            .unwrap();

        assert_eq!(catalog.len(), 2);
        let course = catalog.search("CSCI201").unwrap();
        assert_eq!(course.title(), "Data Structures");
        assert_eq!(course.prerequisites(), ["CSCI101"]);
        assert_eq!(numbers(&catalog), vec!["CSCI101", "CSCI201"]);
    }

    #[test]
    fn every_source_line_round_trips() {
        let catalog: Catalog = SAMPLE.parse().unwrap();
        assert_eq!(catalog.len(), 8);

        for line in SAMPLE.lines() {
            let fields: Vec<_> = line.split(',').collect();
            let course = catalog.search(fields[0]).unwrap();
            assert_eq!(course.number().as_str(), fields[0]);
            assert_eq!(course.title(), fields[1]);
            assert_eq!(course.prerequisites(), &fields[2..]);
        }
    }

    #[test]
    fn lists_in_ascending_order() {
        let catalog: Catalog = SAMPLE.parse().unwrap();
        assert_eq!(
            numbers(&catalog),
            vec![
                "CSCI100", "CSCI101", "CSCI200", "CSCI300", "CSCI301", "CSCI350", "CSCI400",
                "MATH201"
            ]
        );
    }

    #[test]
    fn tolerates_forward_references() {
        let catalog: Catalog = "CSCI200,Data Structures,CSCI100\nCSCI100,Intro to CS\n"
            .parse()
            .unwrap();
        assert!(catalog.contains("CSCI100"));
        assert!(catalog.contains("CSCI200"));
    }

    #[test]
    fn unknown_prerequisite_is_named() {
        let err = "CSCI100,Intro to CS\nCSCI200,Data Structures,CSCI150\n"
            .parse::<Catalog>()
            .unwrap_err();
        match err {
            LoadError::UnknownPrerequisite(number) => assert_eq!(number, "CSCI150"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn first_unknown_prerequisite_is_reported() {
        let err = "CSCI100,Intro,MATH999,CSCI999,BIOL999\n"
            .parse::<Catalog>()
            .unwrap_err();
        assert!(matches!(err, LoadError::UnknownPrerequisite(n) if n == "BIOL999"));
    }

    #[test]
    fn self_reference_passes_existence_check() {
        let catalog: Catalog = "CSCI100,Intro,CSCI100\n".parse().unwrap();
        assert_eq!(catalog.search("CSCI100").unwrap().prerequisites(), ["CSCI100"]);
    }

    #[test_case("CSCI10,Too Short"; "six characters")]
    #[test_case("CSCI1000,Too Long"; "eight characters")]
    #[test_case(",No Number"; "empty")]
    fn malformed_course_number(line: &str) {
        let text = format!("CSCI100,Intro to CS\n{line}\n");
        let err = text.parse::<Catalog>().unwrap_err();
        match err {
            LoadError::MalformedCourseNumber { line: 2, number } => {
                assert_eq!(number, line.split(',').next().unwrap());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test_case("CSCI100,"; "empty field")]
    #[test_case("CSCI100"; "missing field")]
    #[test_case("CSCI100,,CSCI200"; "empty field with prerequisites")]
    fn empty_title(line: &str) {
        let err = line.parse::<Catalog>().unwrap_err();
        match err {
            LoadError::EmptyTitle { line: 1, number } => assert_eq!(number.as_str(), "CSCI100"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn duplicate_course_number() {
        let err = "CSCI100,Intro\nCSCI200,Data Structures\nCSCI100,Again\n"
            .parse::<Catalog>()
            .unwrap_err();
        match err {
            LoadError::DuplicateCourseNumber { line, number } => {
                assert_eq!(line, 3);
                assert_eq!(number.as_str(), "CSCI100");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn windows_line_endings_are_stripped() {
        let catalog: Catalog = "CSCI100,Intro to CS\r\nCSCI200,Data Structures,CSCI100\r\n"
            .parse()
            .unwrap();
        assert_eq!(catalog.search("CSCI100").unwrap().title(), "Intro to CS");
        assert_eq!(catalog.search("CSCI200").unwrap().prerequisites(), ["CSCI100"]);
    }

    #[test]
    fn lone_carriage_return_is_not_a_prerequisite() {
        let catalog: Catalog = "CSCI100,Intro to CS,\r".parse().unwrap();
        assert!(catalog.search("CSCI100").unwrap().prerequisites().is_empty());
        assert!(catalog.prerequisites().is_empty());
    }

    #[test]
    fn empty_prerequisite_fields_are_skipped() {
        let catalog: Catalog = "CSCI100,Intro\nCSCI200,Data Structures,,CSCI100,\n"
            .parse()
            .unwrap();
        assert_eq!(catalog.search("CSCI200").unwrap().prerequisites(), ["CSCI100"]);
    }

    #[test]
    fn repeated_prerequisites_are_kept_per_course_but_counted_once() {
        let catalog: Catalog =
            "CSCI100,Intro\nCSCI200,Data,CSCI100,CSCI100\nCSCI300,Algo,CSCI100\n"
                .parse()
                .unwrap();
        assert_eq!(
            catalog.search("CSCI200").unwrap().prerequisites(),
            ["CSCI100", "CSCI100"]
        );
        assert_eq!(catalog.prerequisites().len(), 1);
    }

    #[test]
    fn blank_lines_and_byte_order_mark_are_ignored() {
        let catalog: Catalog = "\u{feff}CSCI100,Intro\n\n   \nCSCI200,Data,CSCI100\n"
            .parse()
            .unwrap();
        assert_eq!(numbers(&catalog), vec!["CSCI100", "CSCI200"]);
    }

    #[test]
    fn empty_text_is_an_empty_catalogue() {
        let catalog: Catalog = "".parse().unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn custom_delimiter() {
        let catalog = Catalog::parse("CSCI100;Intro, part one\nCSCI200;Data;CSCI100\n", b';').unwrap();
        assert_eq!(catalog.search("CSCI100").unwrap().title(), "Intro, part one");
        assert_eq!(catalog.search("CSCI200").unwrap().prerequisites(), ["CSCI100"]);
    }

    #[test]
    fn quoted_title_may_contain_the_delimiter() {
        let catalog: Catalog = "CSCI100,\"Intro, Part 1\"\nCSCI200,Data Structures,CSCI100\n"
            .parse()
            .unwrap();
        let course = catalog.search("CSCI100").unwrap();
        assert_eq!(course.title(), "Intro, Part 1");
        assert!(course.prerequisites().is_empty());
        assert_eq!(catalog.prerequisites().iter().collect::<Vec<_>>(), vec!["CSCI100"]);
    }

    #[test]
    fn malformed_record_reports_its_line() {
        let err = "CSCI100,Intro\nCSCI200,Data,CSCI100\nCSCI10,Short\n"
            .parse::<Catalog>()
            .unwrap_err();
        assert!(matches!(err, LoadError::MalformedCourseNumber { line: 3, .. }));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let catalog = Catalog::load(file.path(), DEFAULT_DELIMITER).unwrap();
        assert_eq!(catalog.len(), 8);
    }

    #[test]
    fn load_missing_file_is_inaccessible() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.csv");

        let err = Catalog::load(&missing, DEFAULT_DELIMITER).unwrap_err();
        match err {
            LoadError::FileInaccessible { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn load_non_utf8_file_is_an_invalid_record() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"CSCI100,Intro\nCSCI200,Data \xff Structures\n")
            .unwrap();

        let err = Catalog::load(file.path(), DEFAULT_DELIMITER).unwrap_err();
        assert!(matches!(err, LoadError::InvalidRecord(_)), "{err:?}");
        assert!(err.to_string().to_lowercase().contains("utf-8"));
        assert!(!err.to_string().starts_with("failed to read"));
    }

    #[test]
    fn deep_catalogue_is_debuggable_and_dropped() {
        let text: String = (0..10_000).map(|i| format!("C{i:06},Course {i}\n")).collect();
        let catalog: Catalog = text.parse().unwrap();
        assert_eq!(catalog.len(), 10_000);

        let debug = format!("{catalog:?}");
        assert!(debug.contains("C009999"));
        drop(catalog);
    }

    #[test]
    fn error_display() {
        let err = "CSCI10,Short".parse::<Catalog>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "line 1: invalid course number 'CSCI10': must be exactly 7 characters"
        );

        let err = "CSCI100,Intro,CSCI999".parse::<Catalog>().unwrap_err();
        assert_eq!(err.to_string(), "prerequisite course CSCI999 does not exist");
    }
}
