pub mod assemble;
pub mod assets;
pub mod config;
pub mod error;
pub mod pagination;
pub mod render;
pub mod scaffold;
pub mod site;
pub mod title;
pub mod types;

pub use config::*;
pub use error::*;
pub use pagination::*;
pub use render::*;
pub use scaffold::*;
pub use site::*;
pub use title::*;
pub use types::*;
