pub mod client;

pub use client::ProxyClient;
