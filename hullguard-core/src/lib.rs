#![deny(warnings)]
#![deny(rust_2018_idioms)]

mod date_range;
mod distance;
mod domain;
mod error;
mod mean;

#[cfg(feature = "test")]
mod test_helper;

pub use date_range::*;
pub use distance::*;
pub use domain::*;
pub use error::*;
pub use mean::*;
