#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Runtime support for clients generated by sdkgen.
//!
//! Generated packages depend on this crate for:
//! - `BaseClient` - HTTP transport (`execute`) and response validation (`get_data`)
//! - `Maybe` and `Variables` - request variables that distinguish omitted from null
//! - `pick_branch` - runtime dispatch for interface and union selections
//! - `ClientError` - the error every generated method returns

mod client;
mod dispatch;
mod error;
mod input;
mod maybe;

#[cfg(test)]
mod client_tests;
#[cfg(test)]
mod input_tests;

pub use client::{BaseClient, RawResponse, decode, get_data};
pub use dispatch::{Branch, DispatchError, Fallback, pick_branch};
pub use error::{ClientError, GraphQLError, Location, PathSegment};
pub use input::{InputValue, IntoInput, Variables};
pub use maybe::Maybe;
