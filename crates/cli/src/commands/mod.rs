pub mod spend;
pub mod template;
