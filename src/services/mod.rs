pub mod clock_renderer;
pub mod pattern_resolver;
pub mod raster;
pub mod sheet_renderer;
pub mod timeline_engine;
