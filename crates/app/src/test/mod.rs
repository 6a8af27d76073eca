//! Shared fixtures for service-level tests.


pub(crate) use context::TestContext;
