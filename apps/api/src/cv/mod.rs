pub mod handlers;
pub mod ingest;

#[cfg(test)]
pub mod fixtures;
