//! Delaunay 三角剖分与 Voronoi 单元格
//!
//! - [`DelaunayMesh`]: `delaunator` 结果之上的半边网格，提供邻居遍历和最近点行走
//! - [`voronoi::cell_polygon`]: 按需裁剪出单个 Voronoi 单元格
//!
//! ```text
//! 输入点集 (Vec<Pos2>)
//!        │
//!        ▼
//!  delaunator::triangulate
//!        │
//!        ▼
//!  DelaunayMesh ── neighbors(v) ──▶ cell_polygon(site, neighbors, clip)
//! ```

mod mesh;
pub mod voronoi;

pub use mesh::{DelaunayMesh, EMPTY};
