//! In-memory ordered store of courses.
//!
//! The [`CourseTree`] is an unbalanced binary search tree keyed by course
//! number. It knows nothing about files or prerequisites; it only stores
//! courses and answers lookups.

use std::{cmp::Ordering, fmt};

use thiserror::Error;

use crate::domain::{Course, CourseNumber};

struct Node {
    course: Course,
    lesser: Option<Box<Node>>,
    greater: Option<Box<Node>>,
}

// Children are left out so that formatting a deep tree doesn't recurse.
impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("course", &self.course)
            .finish_non_exhaustive()
    }
}

impl Node {
    const fn new(course: Course) -> Self {
        Self {
            course,
            lesser: None,
            greater: None,
        }
    }
}

/// A binary search tree of courses, keyed by [`CourseNumber`].
///
/// Each node owns its two children. No rebalancing is performed, so the shape
/// of the tree depends on insertion order.
///
/// Sorted input degenerates into a list as deep as it is long, so nothing
/// that walks the whole tree (dropping, formatting) recurses.
#[derive(Default)]
pub struct CourseTree {
    root: Option<Box<Node>>,
    len: usize,
}

/// Error returned when inserting a course whose number is already present.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("course {0} is already present")]
pub struct DuplicateCourse(pub CourseNumber);

impl CourseTree {
    /// Creates an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Inserts a course, keyed by its number.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateCourse`] if a course with the same number is already
    /// present. The tree is left unchanged.
    pub fn insert(&mut self, course: Course) -> Result<(), DuplicateCourse> {
        let mut slot = &mut self.root;

        while let Some(node) = slot {
            slot = match course.number().cmp(node.course.number()) {
                Ordering::Less => &mut node.lesser,
                Ordering::Greater => &mut node.greater,
                Ordering::Equal => return Err(DuplicateCourse(course.number().clone())),
            };
        }

        *slot = Some(Box::new(Node::new(course)));
        self.len += 1;
        Ok(())
    }

    /// Finds the course with exactly this number.
    #[must_use]
    pub fn search(&self, number: &str) -> Option<&Course> {
        let mut current = self.root.as_deref();

        while let Some(node) = current {
            current = match number.cmp(node.course.number().as_str()) {
                Ordering::Less => node.lesser.as_deref(),
                Ordering::Greater => node.greater.as_deref(),
                Ordering::Equal => return Some(&node.course),
            };
        }

        None
    }

    /// Returns `true` if a course with this number is present.
    #[must_use]
    pub fn contains(&self, number: &str) -> bool {
        self.search(number).is_some()
    }

    /// The number of courses in the tree.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree holds no courses.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns an iterator over the courses in ascending course-number order.
    ///
    /// The traversal is lazy and each call starts a fresh one.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_lesser(self.root.as_deref());
        iter
    }

    /// Removes every course, leaving an empty tree.
    pub fn clear(&mut self) {
        let mut pending: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.lesser.take());
            pending.extend(node.greater.take());
        }
        self.len = 0;
    }
}

impl fmt::Debug for CourseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Drop for CourseTree {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<'a> IntoIterator for &'a CourseTree {
    type Item = &'a Course;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over a [`CourseTree`], returned by [`CourseTree::iter`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iter<'a> {
    fn push_lesser(&mut self, mut node: Option<&'a Node>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.lesser.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Course;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_lesser(node.greater.as_deref());
        Some(&node.course)
    }
}
