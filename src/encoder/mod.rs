pub mod block_encoder;
pub mod window;

pub use block_encoder::{tokenize, Lz77Stream};
pub use window::EncoderWindow;
