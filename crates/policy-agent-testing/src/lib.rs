//! # Policy Agent Testing
//!
//! Fixtures for exercising tools without real services:
//!
//! - [`MockTool`]: a tool with canned answers and call tracking
//! - [`SalesforceMock`]: a local server speaking the login and query
//!   endpoints the Salesforce tool uses
//! - [`fixture_credentials`]: a complete credential set

pub mod mock_tools;
pub mod salesforce;

pub use mock_tools::MockTool;
pub use salesforce::{SalesforceMock, fixture_credentials};
