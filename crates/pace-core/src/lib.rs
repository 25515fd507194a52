pub mod classifier;
pub mod config;
pub mod error;
pub mod generator;
pub mod io;
pub mod markdown;
pub mod paths;
pub mod template;
pub mod types;
pub mod validate;
pub mod vocabulary;

pub use classifier::{classify, Classification, Classifier};
pub use error::{PaceError, Result};
pub use types::Level;
