//! Character storage adapters.

mod json_file;
mod memory;

pub use json_file::JsonFileCharacterRepo;
pub use memory::InMemoryCharacterRepo;
