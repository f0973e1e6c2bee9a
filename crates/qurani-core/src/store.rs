//! Read-only access to the verse table.
//!
//! Every predicate value is bound as a parameter. The only text spliced
//! into SQL is a column name taken from the closed [`Category`] enum.

use std::path::Path;

use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};
use tracing::{debug, info};

use crate::category::Category;
use crate::error::{NavError, Result};
use crate::verse::Verse;

/// First global number and verse count of a chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChapterSpan {
    pub first: u32,
    pub count: u32,
}

impl ChapterSpan {
    pub fn last(&self) -> u32 {
        self.first + self.count - 1
    }
}

/// What the navigator needs from a verse store.
pub trait VerseStore {
    /// Verses whose `category` coordinate equals `index`, in order.
    fn verses_in(&self, category: Category, index: u32) -> Result<Vec<Verse>>;

    /// Verses numbered `from..=to`, or `from..` when `to` is `None`.
    fn verses_between(&self, from: u32, to: Option<u32>) -> Result<Vec<Verse>>;

    /// The `category` coordinate owning verse `number`.
    fn coordinate_of(&self, category: Category, number: u32) -> Result<Option<u32>>;

    fn verse(&self, number: u32) -> Result<Option<Verse>>;

    fn chapter_span(&self, chapter: u32) -> Result<Option<ChapterSpan>>;
}

const VERSE_COLUMNS: &str =
    "text, number, sura_name, sura_number, numberInSurah, page, hizb, hizbQuarter, juz";

fn verse_from_row(row: &Row<'_>) -> rusqlite::Result<Verse> {
    Ok(Verse {
        text: row.get(0)?,
        number: row.get(1)?,
        chapter_name: row.get(2)?,
        chapter_id: row.get(3)?,
        number_in_chapter: row.get(4)?,
        page: row.get(5)?,
        hizb: row.get(6)?,
        hizb_quarter: row.get(7)?,
        juz: row.get(8)?,
    })
}

/// A `quran` table in an SQLite database.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens `path` read-only. Missing files and files without a verse table
    /// are reported as [`NavError::StorageUnavailable`].
    pub fn open(path: &Path) -> Result<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn =
            Connection::open_with_flags(path, flags).map_err(NavError::StorageUnavailable)?;
        let store = Self::from_connection(conn)?;
        info!("opened verse store at {}", path.display());
        Ok(store)
    }

    /// Wraps an already open connection.
    pub fn from_connection(conn: Connection) -> Result<Self> {
        conn.prepare(&format!("SELECT {} FROM quran LIMIT 0", VERSE_COLUMNS))
            .map_err(NavError::StorageUnavailable)?;
        Ok(Self { conn })
    }

    fn query_verses<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<Vec<Verse>> {
        let mut statement = self.conn.prepare(sql)?;
        let rows = statement.query_map(params, verse_from_row)?;
        let verses = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        debug!(rows = verses.len(), "{}", sql);
        Ok(verses)
    }
}

impl VerseStore for SqliteStore {
    fn verses_in(&self, category: Category, index: u32) -> Result<Vec<Verse>> {
        let sql = format!(
            "SELECT {} FROM quran WHERE {} = ?1 ORDER BY number",
            VERSE_COLUMNS,
            category.column()
        );
        self.query_verses(&sql, params![index])
    }

    fn verses_between(&self, from: u32, to: Option<u32>) -> Result<Vec<Verse>> {
        match to {
            Some(to) => {
                let sql = format!(
                    "SELECT {} FROM quran WHERE number BETWEEN ?1 AND ?2 ORDER BY number",
                    VERSE_COLUMNS
                );
                self.query_verses(&sql, params![from, to])
            }
            None => {
                let sql = format!(
                    "SELECT {} FROM quran WHERE number >= ?1 ORDER BY number",
                    VERSE_COLUMNS
                );
                self.query_verses(&sql, params![from])
            }
        }
    }

    fn coordinate_of(&self, category: Category, number: u32) -> Result<Option<u32>> {
        let sql = format!("SELECT {} FROM quran WHERE number = ?1", category.column());
        let coordinate = self
            .conn
            .query_row(&sql, params![number], |row| row.get(0))
            .optional()?;
        Ok(coordinate)
    }

    fn verse(&self, number: u32) -> Result<Option<Verse>> {
        let sql = format!("SELECT {} FROM quran WHERE number = ?1", VERSE_COLUMNS);
        let verse = self
            .conn
            .query_row(&sql, params![number], verse_from_row)
            .optional()?;
        Ok(verse)
    }

    fn chapter_span(&self, chapter: u32) -> Result<Option<ChapterSpan>> {
        let (first, count): (Option<u32>, u32) = self.conn.query_row(
            "SELECT MIN(number), COUNT(*) FROM quran WHERE sura_number = ?1",
            params![chapter],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok(first
            .filter(|_| count > 0)
            .map(|first| ChapterSpan { first, count }))
    }
}
