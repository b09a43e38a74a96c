//! Break point collections

use crate::error::CalculationError;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Break positions kept in ascending order as they are inserted.
///
/// Duplicates are kept; call [`SortedPageBreaks::dedup`] when a phase needs
/// unique positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortedPageBreaks {
    breaks: Vec<usize>,
}

impl SortedPageBreaks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a single position at its sorted place
    pub fn insert(&mut self, position: usize) {
        let at = self.breaks.partition_point(|&b| b <= position);
        self.breaks.insert(at, position);
    }

    pub fn contains(&self, position: usize) -> bool {
        self.breaks.binary_search(&position).is_ok()
    }

    /// Drop repeated positions
    pub fn dedup(&mut self) {
        self.breaks.dedup();
    }

    pub fn last(&self) -> Option<usize> {
        self.breaks.last().copied()
    }

    pub fn pop_last(&mut self) -> Option<usize> {
        self.breaks.pop()
    }

    pub fn len(&self) -> usize {
        self.breaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breaks.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.breaks
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.breaks.iter().copied()
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.breaks
    }
}

impl Extend<usize> for SortedPageBreaks {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        self.breaks.extend(iter);
        self.breaks.sort_unstable();
    }
}

impl FromIterator<usize> for SortedPageBreaks {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut breaks = Self::new();
        breaks.extend(iter);
        breaks
    }
}

/// Final page-start lines of a document.
///
/// Always starts at 0 and is strictly increasing; page `k` spans
/// `breaks[k]..breaks[k + 1]` and the last page runs to the end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BreakPoints(Vec<usize>);

impl BreakPoints {
    /// The whole document on one page
    pub fn single_page() -> Self {
        Self(vec![0])
    }

    /// Check the break invariants for a document of `total_lines`
    pub fn new(breaks: Vec<usize>, total_lines: usize) -> Result<Self, CalculationError> {
        if breaks.first() != Some(&0) {
            return Err(CalculationError::MissingLeadingBreak);
        }
        for pair in breaks.windows(2) {
            if pair[1] <= pair[0] {
                return Err(CalculationError::UnorderedBreaks { position: pair[1] });
            }
        }
        if let Some(&last) = breaks.last() {
            if last > 0 && last >= total_lines {
                return Err(CalculationError::BreakOutOfRange {
                    position: last,
                    total: total_lines,
                });
            }
        }
        Ok(Self(breaks))
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.0
    }

    pub fn page_count(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    /// Line ranges of every page
    pub fn pages(&self, total_lines: usize) -> Vec<Range<usize>> {
        self.0
            .iter()
            .enumerate()
            .map(|(k, &start)| {
                let end = self.0.get(k + 1).copied().unwrap_or(total_lines);
                start..end.max(start)
            })
            .collect()
    }

    /// Page holding `line`
    pub fn page_of(&self, line: usize) -> usize {
        self.0.partition_point(|&b| b <= line).saturating_sub(1)
    }
}

impl AsRef<[usize]> for BreakPoints {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

impl PartialEq<Vec<usize>> for BreakPoints {
    fn eq(&self, other: &Vec<usize>) -> bool {
        &self.0 == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order() {
        let mut breaks = SortedPageBreaks::new();
        for position in [40, 0, 15, 30, 15] {
            breaks.insert(position);
        }
        assert_eq!(breaks.as_slice(), &[0, 15, 15, 30, 40]);
        breaks.dedup();
        assert_eq!(breaks.as_slice(), &[0, 15, 30, 40]);
        assert!(breaks.contains(30));
        assert!(!breaks.contains(20));
    }

    #[test]
    fn test_bulk_extend_sorts() {
        let mut breaks: SortedPageBreaks = [9, 3].into_iter().collect();
        breaks.extend([7, 1, 5]);
        assert_eq!(breaks.into_vec(), vec![1, 3, 5, 7, 9]);
    }

    #[test]
    fn test_break_points_invariants() {
        assert!(BreakPoints::new(vec![0, 4, 9], 12).is_ok());
        assert_eq!(
            BreakPoints::new(vec![1, 4], 12),
            Err(CalculationError::MissingLeadingBreak)
        );
        assert_eq!(
            BreakPoints::new(vec![0, 4, 4], 12),
            Err(CalculationError::UnorderedBreaks { position: 4 })
        );
        assert_eq!(
            BreakPoints::new(vec![0, 12], 12),
            Err(CalculationError::BreakOutOfRange {
                position: 12,
                total: 12
            })
        );
        assert!(BreakPoints::new(vec![0], 0).is_ok());
    }

    #[test]
    fn test_pages_and_lookup() {
        let breaks = BreakPoints::new(vec![0, 4, 9], 12).unwrap();
        assert_eq!(breaks.pages(12), vec![0..4, 4..9, 9..12]);
        assert_eq!(breaks.page_of(0), 0);
        assert_eq!(breaks.page_of(4), 1);
        assert_eq!(breaks.page_of(11), 2);
        assert_eq!(breaks.page_count(), 3);
    }
}
