mod integration;
mod languages;
pub(crate) mod utils;
