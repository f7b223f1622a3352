//! Outbound HTTP for media fetches.
//!
//! Generated image URLs are fetched through [`HttpClient`] so tests can swap
//! in [`MockClient`] and count fetches.

mod client;

pub use client::{HttpClient, MockClient, MockResponse, ReqwestClient, ReqwestClientBuilder};
