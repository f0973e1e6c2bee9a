//! Turns a run of verses into one text blob and its position index.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::position::PositionIndex;
use crate::verse::Verse;

/// The basmala. Opens every surah but the ninth; only in al-Fatiha is it a
/// numbered verse of its own.
pub const INVOCATION: &str = "بِسْمِ اللَّهِ الرَّحْمَٰنِ الرَّحِيمِ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Append " (n)" after each verse.
    pub show_verse_number: bool,
    /// Separate verses with a newline instead of a space.
    pub one_verse_per_line: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_verse_number: true,
            one_verse_per_line: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub positions: PositionIndex,
}

pub fn render(verses: &[Verse], options: &RenderOptions) -> Rendered {
    let mut text = String::new();
    let mut positions = PositionIndex::new();
    let mut offset = 0usize;

    for verse in verses {
        let mut piece = String::new();
        if verse.number_in_chapter == 1 {
            let _ = write!(piece, "{} {}\n|\n", verse.chapter_name, verse.chapter_id);
            if verse.chapter_id != 1 {
                piece.push_str(&break_after_invocation(&verse.text));
            } else {
                piece.push_str(&verse.text);
            }
        } else {
            piece.push_str(&verse.text);
        }

        if options.show_verse_number {
            let _ = write!(piece, " ({})", verse.number_in_chapter);
        }
        piece.push(if options.one_verse_per_line { '\n' } else { ' ' });

        let len = piece.chars().count();
        positions.insert(verse.number, offset, offset + len - 1);
        offset += len;
        text.push_str(&piece);
    }

    // Spans were laid out on the untrimmed text; bring them in line.
    let leading = text.chars().take_while(|&c| c == '\n').count();
    let trimmed = text.trim_matches('\n');
    let len = trimmed.chars().count();
    let text = trimmed.to_string();
    positions.shift_left(leading);
    positions.truncate_to(len);

    Rendered { text, positions }
}

/// Puts the invocation on a line of its own when words follow it.
fn break_after_invocation(text: &str) -> String {
    text.replace(&format!("{} ", INVOCATION), &format!("{}\n", INVOCATION))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verse(number: u32, chapter_id: u32, number_in_chapter: u32, text: &str) -> Verse {
        Verse {
            number,
            number_in_chapter,
            chapter_id,
            chapter_name: format!("Surah {}", chapter_id),
            text: text.to_string(),
            page: 1,
            hizb: 1,
            hizb_quarter: 1,
            juz: 1,
        }
    }

    fn inline_numbered() -> RenderOptions {
        RenderOptions::default()
    }

    fn per_line() -> RenderOptions {
        RenderOptions {
            show_verse_number: true,
            one_verse_per_line: true,
        }
    }

    #[test]
    fn test_empty_input() {
        let rendered = render(&[], &inline_numbered());
        assert_eq!(rendered.text, "");
        assert!(rendered.positions.is_empty());
    }

    #[test]
    fn test_inline_layout_and_spans() {
        let verses = vec![verse(10, 2, 3, "alpha"), verse(11, 2, 4, "beta")];
        let rendered = render(&verses, &inline_numbered());
        assert_eq!(rendered.text, "alpha (3) beta (4) ");

        let spans = rendered.positions.spans();
        assert_eq!((spans[0].start, spans[0].end), (0, 9));
        assert_eq!((spans[1].start, spans[1].end), (10, 18));
    }

    #[test]
    fn test_per_line_trims_trailing_newline() {
        let verses = vec![verse(10, 2, 3, "alpha"), verse(11, 2, 4, "beta")];
        let rendered = render(&verses, &per_line());
        assert_eq!(rendered.text, "alpha (3)\nbeta (4)");

        let last = rendered.positions.spans()[1];
        assert_eq!(last.end, rendered.text.chars().count() - 1);
        assert_eq!(rendered.positions.lookup_by_offset(9).unwrap(), 10);
        assert_eq!(rendered.positions.lookup_by_offset(10).unwrap(), 11);
    }

    #[test]
    fn test_without_verse_numbers() {
        let options = RenderOptions {
            show_verse_number: false,
            one_verse_per_line: false,
        };
        let rendered = render(&[verse(10, 2, 3, "alpha")], &options);
        assert_eq!(rendered.text, "alpha ");
    }

    #[test]
    fn test_chapter_header() {
        let rendered = render(&[verse(8, 2, 1, "first")], &per_line());
        assert_eq!(rendered.text, "Surah 2 2\n|\nfirst (1)");
        assert_eq!(rendered.positions.lookup_start(8).unwrap(), 0);
    }

    #[test]
    fn test_invocation_breaks_line_outside_fatiha() {
        let text = format!("{} opening words", INVOCATION);
        let rendered = render(&[verse(8, 2, 1, &text)], &per_line());
        assert_eq!(
            rendered.text,
            format!("Surah 2 2\n|\n{}\nopening words (1)", INVOCATION)
        );
    }

    #[test]
    fn test_lone_invocation_keeps_its_marker() {
        let rendered = render(&[verse(8, 2, 1, INVOCATION)], &per_line());
        assert_eq!(rendered.text, format!("Surah 2 2\n|\n{} (1)", INVOCATION));
    }

    #[test]
    fn test_invocation_stays_inline_in_fatiha() {
        let text = format!("{} tail", INVOCATION);
        let rendered = render(&[verse(1, 1, 1, &text)], &per_line());
        assert_eq!(rendered.text, format!("Surah 1 1\n|\n{} tail (1)", INVOCATION));
    }

    #[test]
    fn test_offsets_count_chars() {
        let verses = vec![verse(1, 1, 2, "ٱلْحَمْدُ"), verse(2, 1, 3, "x")];
        let rendered = render(&verses, &inline_numbered());
        let first_len = "ٱلْحَمْدُ (2) ".chars().count();
        assert_eq!(rendered.positions.lookup_start(2).unwrap(), first_len);
    }

    #[test]
    fn test_leading_newlines_shift_spans() {
        let verses = vec![verse(5, 3, 2, "\n\nbody"), verse(6, 3, 3, "next")];
        let rendered = render(&verses, &inline_numbered());
        assert_eq!(rendered.text, "body (2) next (3) ");
        assert_eq!(rendered.positions.lookup_start(5).unwrap(), 0);
        assert_eq!(rendered.positions.lookup_start(6).unwrap(), 9);
        assert_eq!(rendered.positions.lookup_by_offset(8).unwrap(), 5);
    }
}
