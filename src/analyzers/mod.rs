pub mod extent_analyzer;

pub use extent_analyzer::{ExtentAnalyzer, ExtentReport, GeographicBounds};
