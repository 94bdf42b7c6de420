pub mod derive;
pub mod fee;
pub mod validate;
pub mod value;
pub mod witness;
