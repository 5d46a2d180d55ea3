//! Shared option types: error policy and page selection.

use crate::error::{Error, Result};
use std::ops::RangeInclusive;

/// How per-page failures are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    #[default]
    Strict,
    /// Log the failure, treat the page as empty and continue
    Lenient,
}

/// Which pages an operation covers (1-indexed).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PageSelection {
    /// Every page
    #[default]
    All,
    /// An inclusive range of pages
    Range(RangeInclusive<u32>),
    /// An explicit, sorted list of pages
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.binary_search(&page).is_ok(),
        }
    }

    /// Parse a page selection string (e.g., "all", "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(PageSelection::All);
        }

        if !s.contains(',') {
            if let Some((start, end)) = s.split_once('-') {
                let (start, end) = (parse_page(start, s)?, parse_page(end, s)?);
                if start > end {
                    return Err(Error::InvalidPageRange(s.to_string()));
                }
                return Ok(PageSelection::Range(start..=end));
            }
        }

        let mut pages = Vec::new();
        for part in s.split(',') {
            match part.split_once('-') {
                Some((start, end)) => {
                    let (start, end) = (parse_page(start, s)?, parse_page(end, s)?);
                    if start > end {
                        return Err(Error::InvalidPageRange(s.to_string()));
                    }
                    pages.extend(start..=end);
                }
                None => pages.push(parse_page(part, s)?),
            }
        }

        pages.sort_unstable();
        pages.dedup();
        Ok(PageSelection::Pages(pages))
    }
}

fn parse_page(part: &str, whole: &str) -> Result<u32> {
    match part.trim().parse::<u32>() {
        Ok(0) | Err(_) => Err(Error::InvalidPageRange(whole.to_string())),
        Ok(page) => Ok(page),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all() {
        assert_eq!(PageSelection::parse("").unwrap(), PageSelection::All);
        assert_eq!(PageSelection::parse("ALL").unwrap(), PageSelection::All);
    }

    #[test]
    fn test_parse_range() {
        let selection = PageSelection::parse("2-4").unwrap();
        assert_eq!(selection, PageSelection::Range(2..=4));
        assert!(!selection.includes(1));
        assert!(selection.includes(3));
        assert!(!selection.includes(5));
    }

    #[test]
    fn test_parse_list_with_ranges() {
        let selection = PageSelection::parse("7, 1,3-4,3").unwrap();
        assert_eq!(selection, PageSelection::Pages(vec![1, 3, 4, 7]));
        assert!(selection.includes(4));
        assert!(!selection.includes(2));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(PageSelection::parse("a-b").is_err());
        assert!(PageSelection::parse("0").is_err());
        assert!(PageSelection::parse("5-2").is_err());
        assert!(PageSelection::parse("1,,2").is_err());
    }

    #[test]
    fn test_default_error_mode_is_strict() {
        assert_eq!(ErrorMode::default(), ErrorMode::Strict);
    }
}
