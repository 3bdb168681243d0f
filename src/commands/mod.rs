mod analyze;
mod selectors;

pub use analyze::run_analyze;
pub use selectors::run_selectors;
