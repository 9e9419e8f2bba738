pub mod comparison;
pub mod listing;
pub mod palette;

pub use comparison::{ComparisonRow, Marker, build_rows, render_new_vs_known};
pub use listing::{list_known_openings, render_known_openings};
pub use palette::{Palette, Role};
