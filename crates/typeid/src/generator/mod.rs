mod uuid_v7;

pub use uuid_v7::*;
