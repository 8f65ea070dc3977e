#![forbid(unsafe_code)]

pub mod model;
pub mod quiz;
pub mod script;
pub mod syllabary;
pub mod time;

pub use time::Clock;
