pub mod key;
pub mod keyset;

pub use key::Key;
pub use keyset::{Difficulty, KeySet};
