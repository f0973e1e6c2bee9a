use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{NavError, Result};

/// One of the five schemes the mushaf is divided by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Page,
    Chapter,
    QuarterSection,
    Section,
    Part,
}

impl Category {
    pub fn all() -> [Category; 5] {
        [
            Category::Page,
            Category::Chapter,
            Category::QuarterSection,
            Category::Section,
            Category::Part,
        ]
    }

    pub fn max_index(&self) -> u32 {
        match self {
            Category::Page => 604,
            Category::Chapter => 114,
            Category::QuarterSection => 240,
            Category::Section => 60,
            Category::Part => 30,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Page => "Page",
            Category::Chapter => "Surah",
            Category::QuarterSection => "Quarter",
            Category::Section => "Hizb",
            Category::Part => "Juz",
        }
    }

    pub fn arabic_label(&self) -> &'static str {
        match self {
            Category::Page => "صفحة",
            Category::Chapter => "سورة",
            Category::QuarterSection => "ربع",
            Category::Section => "حزب",
            Category::Part => "جزء",
        }
    }

    /// Column of the verse table holding this coordinate.
    pub(crate) fn column(&self) -> &'static str {
        match self {
            Category::Page => "page",
            Category::Chapter => "sura_number",
            Category::QuarterSection => "hizbQuarter",
            Category::Section => "hizb",
            Category::Part => "juz",
        }
    }

    /// Numeric tag used by saved positions and bookmarks.
    pub fn as_tag(&self) -> u8 {
        match self {
            Category::Page => 0,
            Category::Chapter => 1,
            Category::QuarterSection => 2,
            Category::Section => 3,
            Category::Part => 4,
        }
    }

    pub fn from_tag(tag: i64) -> Result<Self> {
        match tag {
            0 => Ok(Category::Page),
            1 => Ok(Category::Chapter),
            2 => Ok(Category::QuarterSection),
            3 => Ok(Category::Section),
            4 => Ok(Category::Part),
            other => Err(NavError::InvalidCategory(other)),
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "page" => Some(Category::Page),
            "chapter" | "surah" | "sura" => Some(Category::Chapter),
            "quarter" | "quarter_section" | "hizb_quarter" | "rub" => {
                Some(Category::QuarterSection)
            }
            "section" | "hizb" => Some(Category::Section),
            "part" | "juz" => Some(Category::Part),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
