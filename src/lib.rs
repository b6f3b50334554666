//! Course Catalogue Planning
//!
//! Courses are loaded from a delimited text file, validated so that every
//! prerequisite is itself a known course, and held in order of course number
//! for listing and lookup.

pub mod domain;
pub use domain::{Catalog, Config, Course, CourseNumber, CourseTree, LoadError, PrerequisiteSet};
