pub mod check;
pub mod config;
pub mod invocation;
pub mod prober;
