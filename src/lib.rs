#![warn(clippy::all, rust_2018_idioms)]

mod app;
pub mod compositor;
pub mod config;
pub mod delaunay;
pub mod error;
pub mod map;
pub mod raster;
pub mod settlement;
pub mod spatial;
pub mod terrain;
pub mod ui;
pub mod view;

pub use app::ChizuApp;
pub use config::MapConfig;
pub use error::MapError;
pub use map::FantasyMap;
