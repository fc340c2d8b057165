pub mod config;
pub mod error;
pub mod result;
pub mod visitor;
pub mod vocabulary;

pub use config::*;
pub use error::*;
pub use result::*;
pub use visitor::*;
pub use vocabulary::Vocabulary;
