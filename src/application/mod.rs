pub mod chrome;
pub mod error;
pub mod fetch;
pub mod links;
pub mod listing;
pub mod pagination;
