// Library exports for wgscheck
pub mod compare;
pub mod exec;
pub mod harness;
pub mod tool;
