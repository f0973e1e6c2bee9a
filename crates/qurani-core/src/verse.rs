use serde::{Deserialize, Serialize};

use crate::category::Category;

/// One row of the verse table.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Verse {
    /// Global sequence number, 1..=6236.
    pub number: u32,
    pub number_in_chapter: u32,
    pub chapter_id: u32,
    pub chapter_name: String,
    pub text: String,
    pub page: u32,
    pub hizb: u32,
    pub hizb_quarter: u32,
    pub juz: u32,
}

impl Verse {
    /// The coordinate this verse has under `category`.
    pub fn coordinate(&self, category: Category) -> u32 {
        match category {
            Category::Page => self.page,
            Category::Chapter => self.chapter_id,
            Category::QuarterSection => self.hizb_quarter,
            Category::Section => self.hizb,
            Category::Part => self.juz,
        }
    }

    pub fn metadata(&self) -> VerseMetadata {
        VerseMetadata {
            chapter_id: self.chapter_id,
            number: self.number,
            chapter_name: self.chapter_name.clone(),
            number_in_chapter: self.number_in_chapter,
        }
    }
}

/// What the reverse offset lookup reports about a verse.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct VerseMetadata {
    pub chapter_id: u32,
    pub number: u32,
    pub chapter_name: String,
    pub number_in_chapter: u32,
}
