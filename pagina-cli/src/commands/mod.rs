//! CLI command implementations

mod batch;
mod detect;
mod limits;
mod paginate;

pub use batch::batch;
pub use detect::detect;
pub use limits::LimitArgs;
pub use paginate::paginate;
