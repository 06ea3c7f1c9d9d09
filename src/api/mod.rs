pub mod client;
pub mod endpoints;
pub mod models;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;
