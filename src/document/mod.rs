pub(crate) mod color;
pub(crate) mod derive;
pub(crate) mod format;
pub(crate) mod model;
