//! 网格空间索引
//!
//! 将空间划分为均匀的格子，快速找到查询位置附近的点。
//! 结果只是近似最近点，用作 Delaunay 行走的起点。

use egui::{Pos2, Rect};

/// 网格空间索引
///
/// 将二维空间划分为均匀的格子，每个格子记录其中包含的点索引。
/// 边界外的点放入最近的格子。
///
/// # 示例
/// ```ignore
/// let grid = GridIndex::build_auto(&points, bounds);
/// let start = grid.nearest_candidate(&points, query_pos);
/// ```
#[derive(Debug, Clone)]
pub struct GridIndex {
    /// 每个格子的尺寸
    cell_size: f32,
    /// 网格列数
    grid_width: usize,
    /// 网格行数
    grid_height: usize,
    /// 边界框
    bounds: Rect,
    /// cells[y * grid_width + x] = 该格子内的点索引列表
    cells: Vec<Vec<u32>>,
}

impl GridIndex {
    /// 构建网格索引
    ///
    /// `cell_size` 推荐使用点平均间距的 2-4 倍。
    pub fn build(points: &[Pos2], bounds: Rect, cell_size: f32) -> Self {
        let cell_size = cell_size.max(1.0);

        let grid_width = ((bounds.width() / cell_size).ceil() as usize).max(1);
        let grid_height = ((bounds.height() / cell_size).ceil() as usize).max(1);

        let mut index = Self {
            cell_size,
            grid_width,
            grid_height,
            bounds,
            cells: vec![Vec::new(); grid_width * grid_height],
        };

        for (idx, &point) in points.iter().enumerate() {
            let (gx, gy) = index.grid_coords(point);
            index.cells[gy * grid_width + gx].push(idx as u32);
        }

        index
    }

    /// 使用默认格子尺寸构建索引，边界取点集的包围盒
    pub fn build_auto(points: &[Pos2]) -> Self {
        let bounds = Rect::from_points(points);
        if points.is_empty() || !bounds.is_finite() {
            return Self::build(points, Rect::from_min_size(Pos2::ZERO, egui::vec2(1.0, 1.0)), 1.0);
        }

        // 平均间距的 3 倍，每个格子平均约 9 个点
        let area = (bounds.width() * bounds.height()).max(1.0);
        let avg_spacing = (area / points.len() as f32).sqrt();
        Self::build(points, bounds, avg_spacing * 3.0)
    }

    /// 查询位置附近的一个候选点
    ///
    /// 从所在格子开始逐圈向外扩展，返回第一圈非空格子中最近的点。
    /// 点集为空时返回 None。
    pub fn nearest_candidate(&self, points: &[Pos2], pos: Pos2) -> Option<u32> {
        let (gx, gy) = self.grid_coords(pos);
        let max_ring = self.grid_width.max(self.grid_height);

        for ring in 0..=max_ring {
            let candidates = self.ring_points(gx, gy, ring);
            let nearest = candidates.into_iter().min_by(|&a, &b| {
                let da = (points[a as usize] - pos).length_sq();
                let db = (points[b as usize] - pos).length_sq();
                da.total_cmp(&db)
            });
            if nearest.is_some() {
                return nearest;
            }
        }

        None
    }

    /// 获取格子尺寸
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// 获取网格尺寸
    pub fn grid_dimensions(&self) -> (usize, usize) {
        (self.grid_width, self.grid_height)
    }

    // ========================================================================
    // 内部方法
    // ========================================================================

    /// 将点坐标转换为网格坐标（超出边界时钳制到最近的格子）
    fn grid_coords(&self, pos: Pos2) -> (usize, usize) {
        let x = ((pos.x - self.bounds.min.x) / self.cell_size)
            .floor()
            .clamp(0.0, (self.grid_width - 1) as f32) as usize;
        let y = ((pos.y - self.bounds.min.y) / self.cell_size)
            .floor()
            .clamp(0.0, (self.grid_height - 1) as f32) as usize;
        (x, y)
    }

    /// 与 (gx, gy) 切比雪夫距离恰为 `ring` 的格子中的所有点
    fn ring_points(&self, gx: usize, gy: usize, ring: usize) -> Vec<u32> {
        let ring = ring as i64;
        let mut result = Vec::new();
        for dy in -ring..=ring {
            for dx in -ring..=ring {
                if dx.abs() != ring && dy.abs() != ring {
                    continue;
                }
                let nx = gx as i64 + dx;
                let ny = gy as i64 + dy;
                if nx >= 0 && nx < self.grid_width as i64 && ny >= 0 && ny < self.grid_height as i64
                {
                    result.extend_from_slice(&self.cells[ny as usize * self.grid_width + nx as usize]);
                }
            }
        }
        result
    }
}
