//! Page break calculation
//!
//! [`PaginationCalculator`] turns classified lines and their title list into
//! [`BreakPoints`]. With `page_break_on_title` enabled it runs four passes
//! (seed, merge, split, validate); otherwise pages are cut at a fixed count
//! of non-empty lines.

mod breaks;
mod calculator;

pub use breaks::{BreakPoints, SortedPageBreaks};
pub use calculator::{PaginationCalculator, CHAPTER_TAIL_LENIENCY, JUMP_SEARCH_FACTOR};
