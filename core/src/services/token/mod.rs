//! Access-token codec, token-id generation and token GC.

pub mod cleanup;
pub mod codec;
pub mod config;
pub mod id;

pub use cleanup::{CleanupResult, TokenCleanupService};
pub use codec::TokenCodec;
pub use config::TokenConfig;
pub use id::generate_token_id;
