pub mod tables;
pub mod tokens;

pub use tokens::LZ77Token;
