//! Page break calculation over classified lines

use super::breaks::{BreakPoints, SortedPageBreaks};
use crate::error::{CalculationError, PaginationError};
use crate::registry::build_title_index;
use crate::types::{ContentChunk, CountingMode, PaginationConfig, ResolvedLimits, TitleEntry};
use std::collections::HashMap;

/// A chapter's last page may be this fraction of the maximum page size
pub const CHAPTER_TAIL_LENIENCY: f64 = 0.3;

/// Ranges spanning at least this many times the maximum page size are split
/// with the jump search instead of the linear accumulator
pub const JUMP_SEARCH_FACTOR: usize = 10;

/// Computes page break positions for one document.
///
/// A calculator is built for a single document and consumed by
/// [`PaginationCalculator::calculate`].
#[derive(Debug)]
pub struct PaginationCalculator<'a> {
    chunks: &'a [ContentChunk],
    titles: &'a [TitleEntry],
    config: PaginationConfig,
    limits: ResolvedLimits,
    tail_leniency: f64,
    /// Sorted lines where a chapter starts
    chapter_starts: SortedPageBreaks,
    /// `prefix[i]` is the content size of lines `0..i`
    prefix: Vec<usize>,
    length_cache: HashMap<(usize, usize, CountingMode), usize>,
}

impl<'a> PaginationCalculator<'a> {
    /// Validate the inputs and resolve the counting mode
    pub fn new(
        chunks: &'a [ContentChunk],
        titles: &'a [TitleEntry],
        config: &PaginationConfig,
    ) -> Result<Self, PaginationError> {
        if let Some((position, chunk)) = chunks
            .iter()
            .enumerate()
            .find(|(position, chunk)| chunk.index != *position)
        {
            return Err(PaginationError::InvalidInput(format!(
                "chunk at position {} carries index {}",
                position, chunk.index
            )));
        }

        if titles.is_empty() {
            return Err(PaginationError::InvalidTitles);
        }

        let limits = config.resolve_limits()?;
        build_title_index(titles)?;

        let mut prefix = Vec::with_capacity(chunks.len() + 1);
        let mut running = 0;
        prefix.push(running);
        for chunk in chunks {
            running += units(chunk, limits.mode);
            prefix.push(running);
        }

        Ok(Self {
            chunks,
            titles,
            config: config.clone(),
            limits,
            tail_leniency: CHAPTER_TAIL_LENIENCY,
            chapter_starts: SortedPageBreaks::new(),
            prefix,
            length_cache: HashMap::new(),
        })
    }

    /// Override the short-final-page allowance
    pub fn with_tail_leniency(mut self, leniency: f64) -> Self {
        self.tail_leniency = leniency;
        self
    }

    /// Limits in effect after counting-mode resolution
    pub fn limits(&self) -> ResolvedLimits {
        self.limits
    }

    /// Compute the break points, consuming the calculator.
    ///
    /// Never fails: an internal inconsistency is logged and the document is
    /// returned as a single page.
    pub fn calculate(mut self) -> BreakPoints {
        self.length_cache.clear();

        let total = self.chunks.len();
        if total == 0 {
            return BreakPoints::single_page();
        }

        let breaks = if self.config.page_break_on_title {
            self.smart_breaks()
        } else {
            Ok(self.simple_breaks())
        };

        match breaks.and_then(|b| BreakPoints::new(b, total)) {
            Ok(points) => {
                tracing::debug!(
                    lines = total,
                    pages = points.page_count(),
                    mode = ?self.limits.mode,
                    "Calculated page breaks"
                );
                points
            }
            Err(e) => {
                tracing::error!("Pagination failed, showing a single page: {}", e);
                BreakPoints::single_page()
            }
        }
    }

    /// Content size of `start..end`, title lines excluded
    pub fn content_length(&mut self, start: usize, end: usize) -> usize {
        let end = end.min(self.chunks.len());
        if start >= end {
            return 0;
        }

        let key = (start, end, self.limits.mode);
        if let Some(&length) = self.length_cache.get(&key) {
            return length;
        }

        let length = self.prefix[end] - self.prefix[start];
        self.length_cache.insert(key, length);
        length
    }

    /// Contribution of a single line in the active counting mode
    fn units(&self, index: usize) -> usize {
        units(&self.chunks[index], self.limits.mode)
    }

    /// Fixed-size pages ignoring chapter structure
    fn simple_breaks(&self) -> Vec<usize> {
        let total = self.chunks.len();
        let max = self.limits.max;

        let mut breaks = SortedPageBreaks::new();
        breaks.insert(0);

        let mut count = 0;
        for (i, chunk) in self.chunks.iter().enumerate() {
            if chunk.is_non_empty() {
                count += 1;
            }
            if count >= max && i + 1 < total {
                breaks.insert(i + 1);
                count = 0;
            }
        }

        if let Some(last) = breaks.last().filter(|&b| b > 0) {
            let tail = self.chunks[last..]
                .iter()
                .filter(|c| c.is_non_empty())
                .count();
            if tail <= 1 {
                breaks.pop_last();
            }
        }

        breaks.into_vec()
    }

    /// Title-aware pagination: seed, merge, split, validate
    fn smart_breaks(&mut self) -> Result<Vec<usize>, CalculationError> {
        let seeds = self.seed_breaks();
        self.chapter_starts = seeds.clone();

        let merged = self.merge_pass(seeds.as_slice());
        let split = self.split_pass(&merged)?;
        let validated = self.validation_pass(&split);

        tracing::debug!(
            seeds = self.chapter_starts.len(),
            merged = merged.len(),
            split = split.len(),
            validated = validated.len(),
            "Smart pagination phases"
        );

        Ok(validated)
    }

    /// Phase 1: a break at every title line
    fn seed_breaks(&self) -> SortedPageBreaks {
        let total = self.chunks.len();
        let usable = if self.config.is_book_complete {
            &self.titles[..self.titles.len() - 1]
        } else {
            self.titles
        };

        let mut seeds = SortedPageBreaks::new();
        seeds.insert(0);
        for title in usable {
            let line = title.line_index;
            if line == 0 {
                continue;
            }
            if line >= total {
                tracing::warn!(
                    "Title '{}' at line {} lies past the last line {}, skipping",
                    title.text,
                    line,
                    total
                );
                continue;
            }
            if !self.chunks[line].is_title() {
                tracing::warn!(
                    "Title '{}' does not sit on a title line ({}), skipping",
                    title.text,
                    line
                );
                continue;
            }
            seeds.insert(line);
        }
        seeds.dedup();
        seeds
    }

    /// Phase 2: fold short chapters and pack neighbours that fit together
    fn merge_pass(&mut self, seeds: &[usize]) -> Vec<usize> {
        let total = self.chunks.len();
        let ResolvedLimits { min, max, .. } = self.limits;

        let mut kept = vec![0];
        for (i, &boundary) in seeds.iter().enumerate().skip(1) {
            let start = kept.last().copied().unwrap_or(0);
            let next = seeds.get(i + 1).copied().unwrap_or(total);

            if self.content_length(start, boundary) < min {
                continue;
            }
            if self.content_length(start, next) <= max {
                continue;
            }
            kept.push(boundary);
        }

        if kept.len() > 1 {
            let last = kept[kept.len() - 1];
            if self.content_length(last, total) < min {
                kept.pop();
            }
        }

        kept
    }

    /// Phase 3: break up every page larger than the maximum
    fn split_pass(&mut self, merged: &[usize]) -> Result<SortedPageBreaks, CalculationError> {
        let total = self.chunks.len();
        let max = self.limits.max;

        let mut breaks: SortedPageBreaks = merged.iter().copied().collect();
        for (i, &start) in merged.iter().enumerate() {
            let end = merged.get(i + 1).copied().unwrap_or(total);
            if self.content_length(start, end) > max {
                let cuts = self.split_range(start, end);
                if let Some(&bad) = cuts.iter().find(|&&c| c <= start || c >= end) {
                    return Err(CalculationError::BreakOutOfRange {
                        position: bad,
                        total,
                    });
                }
                breaks.extend(cuts);
            }
        }
        breaks.dedup();
        Ok(breaks)
    }

    /// Cut points inside `start..end`, preferring chapter titles
    fn split_range(&mut self, start: usize, end: usize) -> Vec<usize> {
        let max = self.limits.max;
        let mut cuts = Vec::new();
        let mut current = start;

        while self.content_length(current, end) > max {
            if let Some(title) = self.latest_fitting_title(current, end) {
                cuts.push(title);
                current = title;
                continue;
            }

            let span = self.content_length(current, end);
            let by_length = if span < JUMP_SEARCH_FACTOR.saturating_mul(max) {
                self.split_linear(current, end)
            } else {
                self.split_jump(current, end)
            };
            cuts.extend(by_length);
            break;
        }

        cuts
    }

    /// Latest interior title giving a page within limits and a usable rest
    fn latest_fitting_title(&mut self, start: usize, end: usize) -> Option<usize> {
        let ResolvedLimits { min, max, .. } = self.limits;
        let starts = self.chapter_starts.as_slice();
        let lo = starts.partition_point(|&t| t <= start);
        let hi = starts.partition_point(|&t| t < end);
        let interior: Vec<usize> = starts[lo..hi].to_vec();

        for &title in interior.iter().rev() {
            let page = self.content_length(start, title);
            if page < min {
                break;
            }
            if page <= max && self.content_length(title, end) >= min {
                return Some(title);
            }
        }
        None
    }

    /// Single pass accumulator over per-line sizes
    fn split_linear(&mut self, start: usize, end: usize) -> Vec<usize> {
        let ResolvedLimits { min, max, .. } = self.limits;
        let sizes: Vec<usize> = (start..end).map(|i| self.units(i)).collect();

        let mut cuts = Vec::new();
        let mut page_start = start;
        let mut filled = 0;
        for (offset, &size) in sizes.iter().enumerate() {
            let line = start + offset;
            if filled >= min && filled + size > max && line > page_start {
                let cut = self.before_titles(page_start, line);
                cuts.push(cut);
                page_start = cut;
                filled = 0;
            }
            filled += size;
        }

        self.settle_remainder(start, end, &mut cuts);
        cuts
    }

    /// Jump search: grow each page as far as the maximum allows
    fn split_jump(&mut self, start: usize, end: usize) -> Vec<usize> {
        let ResolvedLimits { min, max, .. } = self.limits;
        let mut cuts = Vec::new();
        let mut page_start = start;

        while self.content_length(page_start, end) > max {
            // fits: largest end known to fit, overflow: first end known not to
            let mut fits = page_start;
            let mut step = 1;
            let mut overflow = end;
            while page_start + step < end {
                let candidate = page_start + step;
                if self.content_length(page_start, candidate) <= max {
                    fits = candidate;
                    step *= 2;
                } else {
                    overflow = candidate;
                    break;
                }
            }
            while overflow - fits > 1 {
                let mid = fits + (overflow - fits) / 2;
                if self.content_length(page_start, mid) <= max {
                    fits = mid;
                } else {
                    overflow = mid;
                }
            }

            let raw = if fits > page_start && self.content_length(page_start, fits) >= min {
                fits
            } else {
                overflow
            };
            let cut = self.before_titles(page_start, raw);
            if cut >= end {
                break;
            }
            cuts.push(cut);
            page_start = cut;
        }

        self.settle_remainder(start, end, &mut cuts);
        cuts
    }

    /// Move a cut up so titles ending the page open the next one instead
    fn before_titles(&self, page_start: usize, cut: usize) -> usize {
        let mut cut = cut;
        while cut > page_start + 1 && self.chunks[cut - 1].is_title() {
            cut -= 1;
        }
        cut
    }

    /// Give a short final piece to its neighbour, or rebalance the two
    fn settle_remainder(&mut self, range_start: usize, end: usize, cuts: &mut Vec<usize>) {
        let ResolvedLimits { min, max, .. } = self.limits;
        let Some(&last) = cuts.last() else {
            return;
        };

        let remainder = self.content_length(last, end);
        if remainder > 0 && remainder >= min {
            return;
        }

        let previous = if cuts.len() >= 2 {
            cuts[cuts.len() - 2]
        } else {
            range_start
        };
        if remainder == 0 || self.content_length(previous, end) <= max {
            cuts.pop();
            return;
        }

        let mut cut = last;
        let mut filled = remainder;
        while cut > previous + 1 && filled < min {
            cut -= 1;
            filled += self.units(cut);
        }
        let cut = self.before_titles(previous, cut);
        if filled >= min && self.content_length(previous, cut) >= min {
            if let Some(slot) = cuts.last_mut() {
                *slot = cut;
            }
        }
    }

    /// Phase 4: drop breaks that leave empty or undersized pages
    fn validation_pass(&mut self, breaks: &SortedPageBreaks) -> Vec<usize> {
        let total = self.chunks.len();
        let ResolvedLimits { min, max, .. } = self.limits;
        let lenient = max as f64 * self.tail_leniency;

        let mut kept = vec![0];
        for boundary in breaks.iter().filter(|&b| b > 0 && b < total) {
            let start = kept.last().copied().unwrap_or(0);
            if boundary <= start {
                continue;
            }
            let page = self.content_length(start, boundary);
            if page == 0 {
                continue;
            }
            let chapter_end = self.chapter_starts.contains(boundary);
            if page < min && !(chapter_end && page as f64 >= lenient) {
                tracing::trace!(boundary, page, "Dropping undersized page");
                continue;
            }
            kept.push(boundary);
        }

        if kept.len() > 1 {
            let last = kept[kept.len() - 1];
            let tail = self.content_length(last, total);
            if tail == 0 || (tail < min && (tail as f64) < lenient) {
                kept.pop();
            }
        }

        kept
    }
}

fn units(chunk: &ContentChunk, mode: CountingMode) -> usize {
    if !chunk.is_content() {
        return 0;
    }
    match mode {
        CountingMode::Lines => 1,
        CountingMode::Chars => chunk.char_count,
    }
}
