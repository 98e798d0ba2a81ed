pub mod files;
pub mod validate;
