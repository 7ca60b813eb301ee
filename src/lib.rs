//! vetrina: a server-rendered front end for WordPress content.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
