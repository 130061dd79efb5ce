pub mod constants;
pub mod coordinates;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use coordinates::{is_placeholder, normalize_longitude, round_degrees, round_longitude_360};
pub use filename::{basename, display_relative, is_delayed_mode_core, year_file_path};
pub use progress::ProgressReporter;
