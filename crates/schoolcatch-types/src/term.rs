//! Academic term anchor.
//!
//! Relative expressions such as "next semester" or "this break" are resolved
//! against a configured term instead of the wall clock. The derived terms are
//! rendered into the answer prompt as explicit facts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semester within an academic year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Semester {
    First,
    Second,
}

impl Semester {
    pub fn number(self) -> u8 {
        match self {
            Semester::First => 1,
            Semester::Second => 2,
        }
    }
}

/// Vacation that follows a semester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchoolBreak {
    Summer,
    Winter,
}

impl SchoolBreak {
    pub fn korean_label(self) -> &'static str {
        match self {
            SchoolBreak::Summer => "여름 방학",
            SchoolBreak::Winter => "겨울 방학",
        }
    }
}

/// An academic year plus semester, e.g. 2024 second semester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicTerm {
    pub year: u16,
    pub semester: Semester,
}

impl AcademicTerm {
    pub fn new(year: u16, semester: Semester) -> Self {
        Self { year, semester }
    }

    pub fn next(self) -> Self {
        match self.semester {
            Semester::First => Self::new(self.year, Semester::Second),
            Semester::Second => Self::new(self.year.saturating_add(1), Semester::First),
        }
    }

    pub fn previous(self) -> Self {
        match self.semester {
            Semester::First => Self::new(self.year.saturating_sub(1), Semester::Second),
            Semester::Second => Self::new(self.year, Semester::First),
        }
    }

    /// The vacation that follows this term's final exams.
    pub fn current_break(self) -> SchoolBreak {
        match self.semester {
            Semester::First => SchoolBreak::Summer,
            Semester::Second => SchoolBreak::Winter,
        }
    }

    /// Two-digit academic year label, e.g. "24학년도 2학기".
    pub fn korean_label(self) -> String {
        format!("{:02}학년도 {}학기", self.year % 100, self.semester.number())
    }
}

impl Default for AcademicTerm {
    fn default() -> Self {
        Self::new(2024, Semester::Second)
    }
}

impl fmt::Display for AcademicTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.semester.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_and_previous_from_second_semester() {
        let term = AcademicTerm::new(2024, Semester::Second);
        assert_eq!(term.next(), AcademicTerm::new(2025, Semester::First));
        assert_eq!(term.previous(), AcademicTerm::new(2024, Semester::First));
    }

    #[test]
    fn test_next_and_previous_from_first_semester() {
        let term = AcademicTerm::new(2025, Semester::First);
        assert_eq!(term.next(), AcademicTerm::new(2025, Semester::Second));
        assert_eq!(term.previous(), AcademicTerm::new(2024, Semester::Second));
    }

    #[test]
    fn test_next_saturates_at_last_year() {
        let term = AcademicTerm::new(u16::MAX, Semester::Second);
        assert_eq!(term.next(), AcademicTerm::new(u16::MAX, Semester::First));
    }

    #[test]
    fn test_current_break() {
        assert_eq!(
            AcademicTerm::new(2024, Semester::Second).current_break(),
            SchoolBreak::Winter
        );
        assert_eq!(
            AcademicTerm::new(2025, Semester::First).current_break(),
            SchoolBreak::Summer
        );
    }

    #[test]
    fn test_korean_label_uses_two_digit_year() {
        assert_eq!(AcademicTerm::default().korean_label(), "24학년도 2학기");
        assert_eq!(
            AcademicTerm::new(2009, Semester::First).korean_label(),
            "09학년도 1학기"
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(AcademicTerm::default().to_string(), "2024-2");
    }

    #[test]
    fn test_serde_lowercase_semester() {
        let term: AcademicTerm =
            serde_json::from_str(r#"{"year":2025,"semester":"first"}"#).unwrap();
        assert_eq!(term, AcademicTerm::new(2025, Semester::First));
    }
}
