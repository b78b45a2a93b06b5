//! Value Formatting
//!
//! Leaf helpers turning a value plus a format spec into text. All of them
//! are pure and hold no shared state.
//!
//! ## Modules
//! - `index` - padded counters and Chinese-numeral sequence numbers
//! - `chinese` - integer to Chinese numeral conversion
//! - `date` - custom date patterns for `today`, `now` and file times
//! - `size` - byte counts with units
//! - `image` - pixel dimensions
//! - `file` - file paths and timestamps

pub mod chinese;
pub mod date;
pub mod file;
pub mod image;
pub mod index;
pub mod size;

pub use chinese::{to_chinese, NumeralStyle};
pub use date::{default_date_string, format_date, format_date_value};
pub use file::format_file;
pub use image::format_image;
pub use index::format_index;
pub use size::format_size;
