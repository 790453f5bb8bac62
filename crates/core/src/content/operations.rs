use std::collections::{BTreeSet, HashSet};

use chrono::Datelike;

use super::Picture;

/// Distinct years in which pictures were added, newest first.
pub fn distinct_years(pictures: &[Picture]) -> Vec<i32> {
    let years: BTreeSet<i32> = pictures.iter().map(|p| p.created_at.year()).collect();
    years.into_iter().rev().collect()
}

/// Trims titles, drops blanks and keeps the first occurrence of each.
pub fn unique_titles<I>(titles: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    titles
        .into_iter()
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty() && seen.insert(title.clone()))
        .collect()
}

/// Parses a favourites file: one title per line, `#` starts a comment.
pub fn parse_title_list(contents: &str) -> Vec<String> {
    unique_titles(
        contents
            .lines()
            .filter(|line| !line.trim_start().starts_with('#'))
            .map(str::to_string),
    )
}
