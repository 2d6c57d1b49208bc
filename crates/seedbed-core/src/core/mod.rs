pub(crate) mod commands;
pub(crate) mod dataset;
pub(crate) mod engine;
pub(crate) mod fs;
pub(crate) mod tooling;
