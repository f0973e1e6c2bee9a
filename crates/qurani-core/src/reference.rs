//! Textual verse references such as `2:255`, `2:1-5` or `2:1-3:4`.

use std::sync::OnceLock;

use regex::Regex;

use crate::navigator::RangeBound;

/// Both ends of a parsed reference. `to` is `None` for an open end (`2:5-`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    pub from: RangeBound,
    pub to: Option<RangeBound>,
}

fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*(\d+)(?::(\d+))?\s*(?:(-)\s*(?:(\d+)(?::(\d+))?)?)?\s*$")
            .expect("reference pattern is valid")
    })
}

/// Parses `chapter[:verse][-[chapter:]verse]`.
///
/// A bare chapter covers the whole chapter. After a `chapter:verse` start a
/// lone number ends the range within the same chapter; after a bare chapter
/// it names the last chapter.
pub fn parse_reference(input: &str) -> Option<Reference> {
    let caps = pattern().captures(input)?;
    let chapter: u32 = caps.get(1)?.as_str().parse().ok()?;
    let verse = match caps.get(2) {
        Some(m) => Some(m.as_str().parse::<i64>().ok()?),
        None => None,
    };
    let from = RangeBound::new(chapter, verse);

    if caps.get(3).is_none() {
        return Some(Reference {
            from,
            to: Some(from),
        });
    }

    let to = match (caps.get(4), caps.get(5)) {
        (None, _) => None,
        (Some(first), Some(second)) => Some(RangeBound::new(
            first.as_str().parse().ok()?,
            Some(second.as_str().parse().ok()?),
        )),
        (Some(first), None) if verse.is_some() => {
            Some(RangeBound::new(chapter, Some(first.as_str().parse().ok()?)))
        }
        (Some(first), None) => Some(RangeBound::new(first.as_str().parse().ok()?, None)),
    };
    Some(Reference { from, to })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_verse() {
        let reference = parse_reference("2:255").unwrap();
        assert_eq!(reference.from, RangeBound::new(2, Some(255)));
        assert_eq!(reference.to, Some(RangeBound::new(2, Some(255))));
    }

    #[test]
    fn test_whole_chapter() {
        let reference = parse_reference(" 18 ").unwrap();
        assert_eq!(reference.from, RangeBound::new(18, None));
        assert_eq!(reference.to, Some(RangeBound::new(18, None)));
    }

    #[test]
    fn test_range_within_chapter() {
        let reference = parse_reference("2:1-5").unwrap();
        assert_eq!(reference.from, RangeBound::new(2, Some(1)));
        assert_eq!(reference.to, Some(RangeBound::new(2, Some(5))));
    }

    #[test]
    fn test_range_across_chapters() {
        let reference = parse_reference("2:280 - 3:4").unwrap();
        assert_eq!(reference.to, Some(RangeBound::new(3, Some(4))));

        let reference = parse_reference("112-114").unwrap();
        assert_eq!(reference.from, RangeBound::new(112, None));
        assert_eq!(reference.to, Some(RangeBound::new(114, None)));
    }

    #[test]
    fn test_open_end() {
        let reference = parse_reference("36:5-").unwrap();
        assert_eq!(reference.from, RangeBound::new(36, Some(5)));
        assert_eq!(reference.to, None);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_reference("").is_none());
        assert!(parse_reference("al-baqarah").is_none());
        assert!(parse_reference("2:").is_none());
        assert!(parse_reference("99999999999").is_none());
    }
}
