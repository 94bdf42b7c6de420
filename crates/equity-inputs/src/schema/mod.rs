pub mod directory;
pub mod template;
pub mod witness;
