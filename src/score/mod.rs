pub mod achievements;
pub mod handicap;
pub mod scoring;

pub use achievements::*;
pub use handicap::*;
pub use scoring::*;
