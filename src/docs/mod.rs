pub mod id;
pub mod memory;
pub mod repository;
pub mod storage;
pub mod types;

pub use id::*;
pub use memory::*;
pub use repository::*;
pub use storage::*;
pub use types::*;
