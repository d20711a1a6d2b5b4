mod parse;
mod prefix;
mod type_id;
mod typed;

pub use prefix::*;
pub use type_id::*;
pub use typed::*;
