//! Core types shared by the detector, classifier and pagination calculator

mod chunk;
mod config;
mod title;

pub use chunk::{ContentChunk, ElementType};
pub use config::{CountingMode, PaginationConfig, ResolvedLimits, DEFAULT_CHAR_MULTIPLIER};
pub use title::TitleEntry;
