mod facade;
mod transform;

pub use facade::Blowfish;
pub use transform::{BLOWFISH_BLOCK_SIZE, BlowfishTransform};
