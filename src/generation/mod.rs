// Quiz generation pipeline: prompt construction, the provider call, and
// parsing of the provider's free-text reply into question drafts.

pub mod client;
pub mod parser;
pub mod prompt;

pub use client::GenerationClient;
