mod constants;
mod objs;
mod pods;

pub use constants::*;
pub use objs::*;
pub use pods::*;
