pub mod block_decoder;
pub mod window;

pub use block_decoder::BlockDecoder;
pub use window::SlidingWindow;
