//! Built-in algorithms.

pub mod data_inject;

pub use data_inject::DataInject;
