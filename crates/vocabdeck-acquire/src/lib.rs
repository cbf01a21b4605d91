pub mod audio;
pub mod cambridge;
pub mod error;
pub mod normalize;
pub mod source;
pub mod wordlist;

pub use cambridge::Cambridge;
pub use error::{AudioError, LookupError, WordListError};
pub use source::{DefinitionSource, MediaSource};
