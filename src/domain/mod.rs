pub mod content;
pub mod filter;
