//! Cursor over the five divisions of the mushaf.
//!
//! Every navigation call builds a fresh [`NavigationState`] and swaps it in
//! whole; callers holding an older `Arc` keep a consistent snapshot.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::category::Category;
use crate::error::{NavError, Result};
use crate::position::PositionIndex;
use crate::render::{render, RenderOptions, Rendered};
use crate::state::SavedPosition;
use crate::store::VerseStore;
use crate::verse::{Verse, VerseMetadata};

/// Where a range query starts when neither bound resolves. Verse 1 is not
/// part of that range.
pub const UNBOUNDED_RANGE_START: u32 = 2;

/// What the current blob was rendered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Selection {
    Unit { category: Category, index: u32 },
    /// Global verse numbers `from..=to`, or `from..` when `to` is `None`.
    Range { from: u32, to: Option<u32> },
}

/// A (chapter, verse-in-chapter) end of a range query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RangeBound {
    pub chapter: u32,
    /// `None` means the whole chapter on this side.
    pub verse: Option<i64>,
}

impl RangeBound {
    pub fn new(chapter: u32, verse: Option<i64>) -> Self {
        Self { chapter, verse }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    selection: Selection,
    verses: Vec<Verse>,
    rendered: Rendered,
}

impl NavigationState {
    fn initial() -> Self {
        Self {
            selection: Selection::Unit {
                category: Category::Page,
                index: 1,
            },
            verses: Vec::new(),
            rendered: Rendered::default(),
        }
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn category(&self) -> Option<Category> {
        match self.selection {
            Selection::Unit { category, .. } => Some(category),
            Selection::Range { .. } => None,
        }
    }

    pub fn index(&self) -> Option<u32> {
        match self.selection {
            Selection::Unit { index, .. } => Some(index),
            Selection::Range { .. } => None,
        }
    }

    pub fn text(&self) -> &str {
        &self.rendered.text
    }

    pub fn positions(&self) -> &PositionIndex {
        &self.rendered.positions
    }

    pub fn verses(&self) -> &[Verse] {
        &self.verses
    }

    pub fn verse_count(&self) -> usize {
        self.verses.len()
    }

    pub fn has_next(&self) -> bool {
        match self.selection {
            Selection::Unit { category, index } => index < category.max_index(),
            Selection::Range { .. } => false,
        }
    }

    pub fn has_previous(&self) -> bool {
        match self.selection {
            Selection::Unit { index, .. } => index > 1,
            Selection::Range { .. } => false,
        }
    }

    /// Heading for the current selection, e.g. "Page 3" or the surah name.
    pub fn title(&self) -> String {
        match self.selection {
            Selection::Unit {
                category: Category::Chapter,
                index,
            } => self
                .verses
                .last()
                .map(|verse| verse.chapter_name.clone())
                .unwrap_or_else(|| format!("{} {}", Category::Chapter.label(), index)),
            Selection::Unit { category, index } => format!("{} {}", category.label(), index),
            Selection::Range { .. } => "Range".to_string(),
        }
    }
}

/// Result of jumping to a verse by its global number.
#[derive(Debug, Clone)]
pub struct Located {
    pub verse_text: String,
    pub state: Arc<NavigationState>,
}

/// Result of reopening a saved position.
#[derive(Debug, Clone)]
pub struct Restored {
    pub state: Arc<NavigationState>,
    /// Start offset of the saved verse in the new blob.
    pub cursor: Option<usize>,
}

pub struct Navigator<S> {
    store: S,
    options: RenderOptions,
    state: Arc<NavigationState>,
}

impl<S: VerseStore> Navigator<S> {
    /// Starts on page 1 with nothing rendered yet.
    pub fn new(store: S, options: RenderOptions) -> Self {
        Self {
            store,
            options,
            state: Arc::new(NavigationState::initial()),
        }
    }

    pub fn state(&self) -> Arc<NavigationState> {
        Arc::clone(&self.state)
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Takes effect on the next render.
    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
    }

    fn replace(&mut self, selection: Selection, verses: Vec<Verse>) -> Arc<NavigationState> {
        let rendered = render(&verses, &self.options);
        debug!(
            ?selection,
            verses = verses.len(),
            chars = rendered.positions.spans().last().map_or(0, |span| span.end + 1),
            "rendered selection"
        );
        self.state = Arc::new(NavigationState {
            selection,
            verses,
            rendered,
        });
        Arc::clone(&self.state)
    }

    /// Renders unit `index` of `category`. Indices past the last unit clamp to
    /// it; index 0 is rejected.
    pub fn select(&mut self, category: Category, index: u32) -> Result<Arc<NavigationState>> {
        if index < 1 {
            warn!(%category, index, "rejected index below 1");
            return Err(NavError::OutOfRangeIndex { category, index });
        }
        let index = index.min(category.max_index());
        let verses = self.store.verses_in(category, index)?;
        Ok(self.replace(Selection::Unit { category, index }, verses))
    }

    /// `None` at the last unit or while a range is shown.
    pub fn next(&mut self) -> Result<Option<Arc<NavigationState>>> {
        match self.state.selection {
            Selection::Unit { category, index } if index < category.max_index() => {
                self.select(category, index + 1).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// `None` at the first unit or while a range is shown.
    pub fn previous(&mut self) -> Result<Option<Arc<NavigationState>>> {
        match self.state.selection {
            Selection::Unit { category, index } if index > 1 => {
                self.select(category, index - 1).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Jumps within the current category. `None` when `index` is past the
    /// last unit or a range is shown.
    pub fn goto(&mut self, index: u32) -> Result<Option<Arc<NavigationState>>> {
        match self.state.selection {
            Selection::Unit { category, .. } if index <= category.max_index() => {
                self.select(category, index).map(Some)
            }
            _ => Ok(None),
        }
    }

    fn resolve_bound(&self, bound: RangeBound, is_end: bool) -> Result<Option<u32>> {
        let Some(span) = self.store.chapter_span(bound.chapter)? else {
            debug!(chapter = bound.chapter, "range bound names no chapter");
            return Ok(None);
        };
        let number = match bound.verse {
            None if is_end => span.last(),
            None => span.first,
            Some(verse) if verse < 1 => span.first,
            Some(verse) if verse >= i64::from(span.count) => span.last(),
            Some(verse) => span.first + (verse as u32 - 1),
        };
        Ok(Some(number))
    }

    /// Renders an arbitrary stretch of verses given by (chapter, verse) ends.
    pub fn range_query(
        &mut self,
        from: Option<RangeBound>,
        to: Option<RangeBound>,
    ) -> Result<Arc<NavigationState>> {
        let from = match from {
            Some(bound) => self.resolve_bound(bound, false)?,
            None => None,
        };
        let to = match to {
            Some(bound) => self.resolve_bound(bound, true)?,
            None => None,
        };
        let (from, to) = match (from, to) {
            (from, Some(to)) => (from.unwrap_or(1), Some(to)),
            (Some(from), None) => (from, None),
            (None, None) => (UNBOUNDED_RANGE_START, None),
        };
        let verses = self.store.verses_between(from, to)?;
        Ok(self.replace(Selection::Range { from, to }, verses))
    }

    /// Renders the unit of the current category that holds verse `number`.
    pub fn locate_by_verse_number(&mut self, number: u32) -> Result<Located> {
        let category = self.state.category().ok_or(NavError::NoActiveCategory)?;
        let coordinate = self
            .store
            .coordinate_of(category, number)?
            .ok_or(NavError::UnknownVerseNumber(number))?;
        let state = self.select(category, coordinate)?;
        let verse_text = state
            .verses()
            .iter()
            .find(|verse| verse.number == number)
            .map(|verse| verse.text.clone())
            .ok_or(NavError::UnknownVerseNumber(number))?;
        Ok(Located { verse_text, state })
    }

    /// The verse owning `offset` in the last rendered blob.
    pub fn verse_at(&self, offset: usize) -> Result<Verse> {
        let number = self.state.positions().lookup_by_offset(offset)?;
        self.store
            .verse(number)?
            .ok_or(NavError::UnknownVerseNumber(number))
    }

    pub fn resolve_offset(&self, offset: usize) -> Result<VerseMetadata> {
        self.verse_at(offset).map(|verse| verse.metadata())
    }

    pub fn restore(&mut self, saved: &SavedPosition) -> Result<Restored> {
        let category = Category::from_tag(i64::from(saved.criteria_number))?;
        let state = self.select(category, saved.position)?;
        let cursor = state.positions().lookup_start(saved.ayah_number).ok();
        Ok(Restored { state, cursor })
    }

    /// Captures the current unit and the verse under `offset`.
    pub fn save_position(&self, offset: usize) -> Result<SavedPosition> {
        let Selection::Unit { category, index } = self.state.selection else {
            return Err(NavError::NoActiveCategory);
        };
        let ayah_number = self.state.positions().lookup_by_offset(offset)?;
        Ok(SavedPosition {
            criteria_number: category.as_tag(),
            position: index,
            ayah_number,
        })
    }
}
