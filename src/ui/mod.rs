pub mod output;
pub mod progress;
pub mod theme;

pub use output::{Icons, count, database, error, header, phase, success, warn};
pub use progress::ChunkProgress;
pub use theme::{Theme, theme};
