pub mod actions;
pub mod assertions;
pub mod mocks;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use assertions::{ReplyAssertion, StatLineAssertion};
#[allow(unused_imports)]
pub use mocks::{MockDirectory, MockIngestion};
#[allow(unused_imports)]
pub use setup::{TestSetup, TestSetupBuilder};
