pub(crate) mod compositor;
pub(crate) mod glyphs;
pub(crate) mod label;
pub(crate) mod raster;
