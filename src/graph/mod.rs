pub mod builder;
pub mod ir;
