//! Cross-subsystem integration tests.

pub mod fixtures;

#[cfg(test)]
mod concurrency;
#[cfg(test)]
mod flows;
#[cfg(test)]
mod http;
