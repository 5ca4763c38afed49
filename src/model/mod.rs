pub mod achievement;
pub mod club;
pub mod course;
pub mod identity;
pub mod round;
pub mod validation;

pub use achievement::*;
pub use club::*;
pub use course::*;
pub use identity::*;
pub use round::*;
pub use validation::*;
