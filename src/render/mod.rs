pub(crate) mod cpu;
pub(crate) mod raster;
pub(crate) mod text;
