pub mod consts;
pub mod error;
pub mod geom;
pub mod region;
pub mod transform;
pub mod paint_queue;
pub mod governor;
pub mod busy;
pub mod raster;
pub mod scale;
pub mod adjust;
pub mod composite;
pub mod dither;
pub mod config;
pub mod document;
pub mod tool;
pub mod zoom;
pub mod menu;
pub mod surface;
pub mod paint;
pub mod view;
