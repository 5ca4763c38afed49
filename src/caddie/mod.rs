pub mod advice;
pub mod client;
pub mod evidence;
pub mod markdown;
pub mod prompt;

pub use advice::*;
pub use client::*;
pub use evidence::*;
pub use markdown::*;
pub use prompt::*;
