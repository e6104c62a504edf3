pub mod pages;
pub mod statics;
pub mod submit;
