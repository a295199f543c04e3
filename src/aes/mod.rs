mod facade;
mod transform;

pub use facade::Aes;
pub use transform::AesTransform;
