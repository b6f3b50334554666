//! Domain models for the course planner.
//!
//! This module contains the course types, the ordered course store, the
//! prerequisite set used for validation and the catalogue loader that ties
//! them together.

mod course;
pub use course::{COURSE_NUMBER_LEN, Course, CourseNumber, Details, InvalidCourseNumber, Summary};

/// Ordered in-memory storage of courses.
pub mod tree;
pub use tree::CourseTree;

mod prerequisites;
pub use prerequisites::PrerequisiteSet;

/// Catalogue loading and prerequisite validation.
pub mod catalog;
pub use catalog::{Catalog, LoadError};

mod config;
pub use config::{CONFIG_FILE, Config, DEFAULT_DATA_FILE};
