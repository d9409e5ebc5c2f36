mod codec;
pub mod fips;
mod geoid;

pub use geoid::*;
