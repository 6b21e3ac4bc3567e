//! 最近点查询与 Voronoi 单元格
//!
//! 组合 [`DelaunayMesh`] 与 [`GridIndex`]：网格给出起点，
//! 沿 Delaunay 邻居贪心行走得到精确的最近点。

use egui::{Pos2, Rect};

use super::GridIndex;
use crate::delaunay::{voronoi, DelaunayMesh};

/// 点集上的空间索引
///
/// 点集变化时整体重建，不做原地更新。
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    mesh: DelaunayMesh,
    grid: GridIndex,
}

impl SpatialIndex {
    pub fn build(points: &[Pos2]) -> Self {
        let mesh = DelaunayMesh::build(points);
        let grid = GridIndex::build_auto(points);
        log::debug!(
            "空间索引: {} 点, {} 三角形, 网格 {:?}",
            mesh.point_count(),
            mesh.triangle_count(),
            grid.grid_dimensions()
        );
        Self { mesh, grid }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.mesh.points
    }

    pub fn len(&self) -> usize {
        self.mesh.point_count()
    }

    pub fn is_empty(&self) -> bool {
        self.mesh.points.is_empty()
    }

    pub fn mesh(&self) -> &DelaunayMesh {
        &self.mesh
    }

    /// 最近点索引，点集为空时返回 None
    pub fn find_nearest(&self, pos: Pos2) -> Option<usize> {
        let start = self.grid.nearest_candidate(&self.mesh.points, pos)?;
        Some(self.walk_or_scan(pos, start))
    }

    /// 从上一次的结果 `hint` 出发查找最近点
    ///
    /// 扫描线上相邻查询的最近点通常相同或相邻，行走只需几步。
    pub fn find_nearest_from(&self, pos: Pos2, hint: usize) -> Option<usize> {
        if hint >= self.len() {
            return self.find_nearest(pos);
        }
        Some(self.walk_or_scan(pos, hint as u32))
    }

    /// 点 `i` 的 Delaunay 邻居（含凸包上的点）
    pub fn neighbors(&self, i: usize) -> Vec<usize> {
        self.mesh
            .neighbors(i as u32)
            .into_iter()
            .map(|n| n as usize)
            .collect()
    }

    /// 点 `i` 的 Voronoi 单元格，裁剪到 `clip`
    ///
    /// 单元格完全落在 `clip` 外时返回空多边形。
    pub fn cell_polygon(&self, i: usize, clip: Rect) -> Vec<Pos2> {
        let Some(&site) = self.mesh.points.get(i) else {
            return Vec::new();
        };

        if self.mesh.is_connected(i as u32) {
            let neighbors = self.mesh.neighbors(i as u32);
            voronoi::cell_polygon(
                site,
                neighbors.iter().map(|&n| self.mesh.points[n as usize]),
                clip,
            )
        } else {
            // 退化输入（少于三点、共线、重复点）：与所有点切割
            voronoi::cell_polygon(site, self.mesh.points.iter().copied(), clip)
        }
    }

    fn walk_or_scan(&self, pos: Pos2, start: u32) -> usize {
        if self.mesh.is_connected(start) {
            return self.mesh.walk_to_nearest(pos, start) as usize;
        }
        self.brute_force(pos)
    }

    fn brute_force(&self, pos: Pos2) -> usize {
        self.mesh
            .points
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (**a - pos).length_sq().total_cmp(&(**b - pos).length_sq()))
            .map_or(0, |(i, _)| i)
    }
}
