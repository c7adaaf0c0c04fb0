pub mod client;
pub mod diagnosis;
pub mod query;
pub mod task;

#[cfg(test)]
pub(crate) mod testing;
