//! Command implementations

pub(crate) mod dashboard;
pub(crate) mod init;
pub(crate) mod inspect;
pub(crate) mod predict;
