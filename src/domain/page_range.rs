//! Page range expressions.
//!
//! Parses the `--pages` argument: a comma-separated list of 1-based page
//! numbers and inclusive ranges, e.g. `1,4-6`.

use crate::error::{RedactorError, RedactorResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// A parsed page range expression.
///
/// Ranges are kept in the order they were written, 1-based and inclusive.
/// Overlaps are allowed; they collapse when the selection is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSpec {
    ranges: Vec<RangeInclusive<u32>>,
}

impl PageSpec {
    /// Parses a page range expression.
    ///
    /// # Errors
    /// Returns [`RedactorError::InvalidPageSpec`] for empty expressions or
    /// tokens, non-numeric tokens, missing bounds, reversed ranges, and
    /// page `0`.
    pub fn parse(text: &str) -> RedactorResult<Self> {
        if text.trim().is_empty() {
            return Err(invalid(text, "expression is empty"));
        }

        let ranges = text
            .split(',')
            .map(|token| parse_token(text, token))
            .collect::<RedactorResult<Vec<_>>>()?;

        Ok(Self { ranges })
    }

    /// Returns the parsed 1-based inclusive ranges.
    pub fn ranges(&self) -> &[RangeInclusive<u32>] {
        &self.ranges
    }

    /// Iterates zero-based page indices below `page_count`.
    ///
    /// Each range is clamped before expansion, so the cost is bounded by
    /// `page_count` rather than by the numbers written in the expression.
    pub fn zero_based_below(&self, page_count: usize) -> impl Iterator<Item = usize> + '_ {
        self.ranges.iter().flat_map(move |range| {
            let start = *range.start() as usize - 1;
            let end = (*range.end() as usize).min(page_count);
            start..end.max(start)
        })
    }
}

impl Default for PageSpec {
    /// First page only.
    fn default() -> Self {
        Self { ranges: vec![1..=1] }
    }
}

impl FromStr for PageSpec {
    type Err = RedactorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn token_regex() -> &'static Regex {
    static PATTERN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^(\d+)(?:\s*-\s*(\d+))?$").expect("Valid page token regex")
    });
    &PATTERN
}

fn parse_token(spec: &str, token: &str) -> RedactorResult<RangeInclusive<u32>> {
    let token = token.trim();
    if token.is_empty() {
        return Err(invalid(spec, "empty entry between commas"));
    }

    let caps = token_regex().captures(token).ok_or_else(|| {
        invalid(
            spec,
            &format!("'{}' is not a page number or a range like 4-6", token),
        )
    })?;

    let start = parse_page(spec, &caps[1])?;
    let end = match caps.get(2) {
        Some(m) => parse_page(spec, m.as_str())?,
        None => start,
    };

    if start > end {
        return Err(invalid(
            spec,
            &format!("range {}-{} is reversed", start, end),
        ));
    }

    Ok(start..=end)
}

fn parse_page(spec: &str, digits: &str) -> RedactorResult<u32> {
    let page: u32 = digits
        .parse()
        .map_err(|_| invalid(spec, &format!("page number {} is too large", digits)))?;

    if page == 0 {
        return Err(invalid(spec, "page numbers start at 1"));
    }

    Ok(page)
}

fn invalid(spec: &str, reason: &str) -> RedactorError {
    RedactorError::InvalidPageSpec {
        spec: spec.to_string(),
        reason: reason.to_string(),
    }
}
