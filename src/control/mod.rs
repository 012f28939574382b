//! Output control policies.

pub mod indicator;
