pub mod record;
pub mod media;

pub use record::*;
pub use media::*;
