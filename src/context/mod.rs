//! Execution context: capability resolution with variant overrides.
//!
//! ## How it fits together
//!
//! 1. Rule code declares a [`Role`] per capability, with a generic default.
//! 2. A variant lists [`Override`]s in its settings bundle.
//! 3. Each game owns one [`Injector`]; `resolve::<R>()` returns the winning
//!    implementation, built once and memoized.
//!
//! Overrides that extend rather than replace behaviour call
//! [`Injector::generic`] to obtain the generic implementation and wrap it.

mod injector;
mod role;

pub use injector::Injector;
pub use role::{Factory, Override, Role};
