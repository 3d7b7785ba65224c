mod enquire;
mod health_check;
mod index;

pub use enquire::*;
pub use health_check::*;
pub use index::*;
