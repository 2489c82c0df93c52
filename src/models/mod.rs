pub mod dataset;
pub mod embed;
pub mod report;

pub use dataset::*;
pub use embed::*;
pub use report::*;
