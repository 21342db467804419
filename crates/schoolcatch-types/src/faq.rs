//! Locale and FAQ topic keys for the static content panels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display language of the chat surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ko,
    En,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Ko => write!(f, "ko"),
            Locale::En => write!(f, "en"),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ko" | "kr" | "korean" | "한국어" => Ok(Locale::Ko),
            "en" | "english" => Ok(Locale::En),
            other => Err(format!("unsupported locale: '{other}'")),
        }
    }
}

/// One of the fixed FAQ panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaqTopic {
    Scholarship,
    CampusMap,
    Tuition,
    ExamSchedule,
}

impl FaqTopic {
    /// Panel order on the page.
    pub const ALL: [FaqTopic; 4] = [
        FaqTopic::Scholarship,
        FaqTopic::CampusMap,
        FaqTopic::Tuition,
        FaqTopic::ExamSchedule,
    ];

    pub fn key(self) -> &'static str {
        match self {
            FaqTopic::Scholarship => "scholarship",
            FaqTopic::CampusMap => "campus_map",
            FaqTopic::Tuition => "tuition",
            FaqTopic::ExamSchedule => "exam_schedule",
        }
    }
}

impl fmt::Display for FaqTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FaqTopic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FaqTopic::ALL
            .into_iter()
            .find(|t| t.key() == s.trim().to_lowercase())
            .ok_or_else(|| format!("unknown FAQ topic: '{s}'"))
    }
}
