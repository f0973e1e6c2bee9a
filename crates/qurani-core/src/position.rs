//! Offset-to-verse mapping for a rendered blob.
//!
//! Offsets count `char`s, not bytes, so they line up with a text widget's
//! cursor position.

use serde::Serialize;

use crate::error::{LookupMiss, NavError, Result};

/// A verse's inclusive `[start, end]` character span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub verse: u32,
    pub start: usize,
    pub end: usize,
}

/// Spans in increasing offset order. Rebuilt from scratch on every render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PositionIndex {
    spans: Vec<Span>,
}

impl PositionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a span. The renderer inserts in increasing, non-overlapping
    /// order; nothing else is checked.
    pub fn insert(&mut self, verse: u32, start: usize, end: usize) {
        debug_assert!(start <= end);
        debug_assert!(self.spans.last().map_or(true, |last| last.end < start));
        self.spans.push(Span { verse, start, end });
    }

    /// The verse whose span contains `offset`.
    pub fn lookup_by_offset(&self, offset: usize) -> Result<u32> {
        // First span whose end is not before the offset.
        let idx = self.spans.partition_point(|span| span.end < offset);
        match self.spans.get(idx) {
            Some(span) if span.start <= offset => Ok(span.verse),
            _ => Err(NavError::IndexLookupMiss(LookupMiss::Offset(offset))),
        }
    }

    pub fn lookup_start(&self, verse: u32) -> Result<usize> {
        self.spans
            .iter()
            .find(|span| span.verse == verse)
            .map(|span| span.start)
            .ok_or(NavError::IndexLookupMiss(LookupMiss::Verse(verse)))
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Moves every span `by` characters towards the start of the blob.
    pub(crate) fn shift_left(&mut self, by: usize) {
        if by == 0 {
            return;
        }
        self.spans.retain(|span| span.end >= by);
        for span in &mut self.spans {
            span.start = span.start.saturating_sub(by);
            span.end -= by;
        }
    }

    /// Clamps spans to a blob of `len` characters.
    pub(crate) fn truncate_to(&mut self, len: usize) {
        if len == 0 {
            self.spans.clear();
            return;
        }
        let last = len - 1;
        self.spans.retain(|span| span.start <= last);
        if let Some(span) = self.spans.last_mut() {
            span.end = span.end.min(last);
        }
    }
}
