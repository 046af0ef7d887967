pub(crate) mod debounce;
pub(crate) mod store;
