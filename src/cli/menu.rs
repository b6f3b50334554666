use std::{fmt, str::FromStr};

use planner::CourseNumber;

pub const MENU: &str = "
  /==============================\\
  |  Menu                        |
  |    1. Load Courses           |
  |    2. Display Courses        |
  |    3. Find Course by number  |
  |    9. Exit                   |
  \\==============================/
";

/// An entry on the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Load = 1,
    List = 2,
    Find = 3,
    Exit = 9,
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

/// Rejected user input. Reported and re-prompted, never fatal.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    #[error("{0} is not a valid option.")]
    InvalidMenuChoice(String),

    #[error("Invalid course number '{0}': expected 7 characters, e.g. CSCI200")]
    InvalidSearchInput(String),
}

impl FromStr for MenuChoice {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.parse::<u8>() {
            Ok(1) => Ok(Self::Load),
            Ok(2) => Ok(Self::List),
            Ok(3) => Ok(Self::Find),
            Ok(9) => Ok(Self::Exit),
            _ => Err(InputError::InvalidMenuChoice(s.to_string())),
        }
    }
}

/// Parse a course number typed at the search prompt, normalizing to uppercase.
///
/// Course numbers in catalogues are uppercase, so `csci200` finds `CSCI200`.
///
/// # Errors
///
/// Returns [`InputError::InvalidSearchInput`] unless the trimmed input is
/// exactly seven characters.
pub fn parse_course_number(s: &str) -> Result<CourseNumber, InputError> {
    let s = s.trim();
    s.to_uppercase()
        .parse()
        .map_err(|_| InputError::InvalidSearchInput(s.to_string()))
}
