//! CLI command implementations

pub(crate) mod common;
pub(crate) mod create;
pub(crate) mod pending;
pub(crate) mod to;
pub(crate) mod up;
pub(crate) mod version;
