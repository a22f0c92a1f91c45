pub mod api;
pub mod client;

pub use client::{TmdbClient, bare_tv_id};
