pub mod builder;
pub mod merger;
