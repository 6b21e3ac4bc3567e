//! 空间索引模块
//!
//! - [`GridIndex`][]: 基于均匀网格的点索引，为最近点查询提供起点
//! - [`SpatialIndex`][]: 精确最近点、Delaunay 邻居和 Voronoi 单元格

mod grid_index;
mod index;

pub use grid_index::GridIndex;
pub use index::SpatialIndex;
