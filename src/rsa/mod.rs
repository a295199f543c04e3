mod facade;
mod transform;

pub use facade::Rsa;
pub use transform::{PKCS1_PADDING_OVERHEAD, RsaDispatcher, RsaTransform};
