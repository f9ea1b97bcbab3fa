pub mod asset;
pub mod config;
pub mod consts;
pub mod delivery;
pub mod error;
pub mod export;
pub mod geometry;
pub mod preview;
pub mod raster;
pub mod viewport;
