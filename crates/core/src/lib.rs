#![forbid(unsafe_code)]

pub mod defaults;
pub mod model;
