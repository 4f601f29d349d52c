//! Client for the fal.ai generative media API.
//!
//! Two transports: [`FalClient::run`] for synchronous image models and
//! [`FalClient::subscribe`] for long-running video jobs on the queue API
//! (submit, poll, fetch -- the call blocks until the remote job settles).
//! Local inputs are pushed through the storage upload API to obtain
//! public URLs before generation.

pub mod client;
pub mod error;
pub mod images;
pub mod videos;

pub use client::FalClient;
pub use error::FalError;
pub use videos::ImageSource;
