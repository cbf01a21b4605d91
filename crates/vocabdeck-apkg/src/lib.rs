pub mod deck;
pub mod error;
pub mod ids;
pub mod package;
pub mod schema;
pub mod template;

pub use deck::{Deck, Note};
pub use error::PackageError;
pub use package::{finalize, PackageStats};
