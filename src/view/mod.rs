pub mod achievements;
pub mod advice;
pub mod courses;
pub mod index;
pub mod layout;
pub mod rounds;
pub mod scorecard;
pub mod yardages;

pub use layout::{Notice, NoticeLevel};
