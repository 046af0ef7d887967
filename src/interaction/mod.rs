pub(crate) mod gesture;
pub(crate) mod mappers;
pub(crate) mod session;
