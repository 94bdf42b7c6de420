pub mod kind;
pub mod node;
pub mod tree;
