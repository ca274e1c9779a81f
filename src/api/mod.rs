// Field59 API client module
//
// Infrastructure layer: everything that talks to the vendor or stands in for it.
// - auth:    credential pair and Basic-Auth header
// - client:  HTTP transport
// - error:   ApiError and failure classification
// - xml:     response parsing / request body encoding
// - field59: list / get / create / delete against the vendor
// - mock:    in-memory catalogue seeded from a fixture
// - source:  dispatch between the two

pub mod auth;
pub mod client;
pub mod error;
pub mod field59;
pub mod mock;
pub mod source;
pub mod types;
pub mod xml;
