// 软件光栅：渲染缓存表面、渐变画刷和三种地形绘制方式

pub mod gradient;
pub mod surface;
pub mod terrain;

pub use gradient::LinearBrush;
pub use surface::Raster;
pub use terrain::{render_terrain, RenderMode, TerrainScene, PIXEL_CELL};
