pub mod action;
pub mod mark;
pub mod position;

pub use action::*;
pub use mark::*;
pub use position::*;
