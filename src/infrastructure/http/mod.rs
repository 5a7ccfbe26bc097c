pub mod client;
mod payload;

pub use client::HttpBackend;
