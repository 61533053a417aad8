#![doc = include_str!("../README.md")]
#![warn(missing_docs, unused_imports)]

pub use paillier_he::bytes;
pub use paillier_he::cryptosystems;
pub use paillier_he::{PaillierError, Result};
pub use paillier_numbertheory;
pub use paillier_traits;
