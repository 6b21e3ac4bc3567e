//! 半边数据结构 (Half-Edge / DCEL)
//!
//! 在 `delaunator` 的输出之上提供邻接查询：
//! - `triangles[i]` = 半边 i 的起点
//! - `halfedges[i]` = 半边 i 的对偶半边（twin），凸包边界上为 [`EMPTY`]
//! - 三角形 t 的三条半边索引为 `3*t`, `3*t+1`, `3*t+2`
//!
//! 每个顶点记录一条"入边"（终点为该顶点的半边）。凸包上的顶点优先记录
//! 凸包边界上的入边，这样从入边出发绕顶点一圈即可访问全部邻居。

use egui::Pos2;

/// 无效索引标记（对应 delaunator::EMPTY）
pub const EMPTY: u32 = u32::MAX;

/// Delaunay 网格（半边表示）
#[derive(Debug, Clone, Default)]
pub struct DelaunayMesh {
    /// 所有顶点坐标
    pub points: Vec<Pos2>,

    /// halfedges[i] 存储半边 i 的对偶半边索引
    pub halfedges: Vec<u32>,

    /// triangles[i] 是半边 i 的起点，每3个连续索引构成一个三角形
    pub triangles: Vec<u32>,

    /// inedges[v] 是终点为 v 的一条半边；重复点或退化输入为 EMPTY
    pub inedges: Vec<u32>,

    /// 凸包顶点索引（逆时针顺序）
    pub hull: Vec<u32>,
}

impl DelaunayMesh {
    /// 三角剖分点集并构建半边网格
    pub fn build(points: &[Pos2]) -> Self {
        let delaunay_points: Vec<delaunator::Point> = points
            .iter()
            .map(|p| delaunator::Point {
                x: p.x as f64,
                y: p.y as f64,
            })
            .collect();

        let triangulation = delaunator::triangulate(&delaunay_points);
        Self::from_delaunator(points.to_vec(), &triangulation)
    }

    /// 从 delaunator 结果构建半边网格
    pub fn from_delaunator(points: Vec<Pos2>, triangulation: &delaunator::Triangulation) -> Self {
        let triangles: Vec<u32> = triangulation.triangles.iter().map(|&i| i as u32).collect();

        let halfedges: Vec<u32> = triangulation
            .halfedges
            .iter()
            .map(|&i| {
                if i == delaunator::EMPTY {
                    EMPTY
                } else {
                    i as u32
                }
            })
            .collect();

        let hull: Vec<u32> = triangulation.hull.iter().map(|&i| i as u32).collect();

        // 凸包边界上的入边优先
        let mut inedges = vec![EMPTY; points.len()];
        for he in 0..triangles.len() as u32 {
            let end = triangles[Self::next_halfedge(he) as usize] as usize;
            if halfedges[he as usize] == EMPTY || inedges[end] == EMPTY {
                inedges[end] = he;
            }
        }

        Self {
            points,
            halfedges,
            triangles,
            inedges,
            hull,
        }
    }

    // ========================================================================
    // 基本查询
    // ========================================================================

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// 获取同一三角形内的下一条半边
    #[inline]
    pub fn next_halfedge(he: u32) -> u32 {
        if he % 3 == 2 {
            he - 2
        } else {
            he + 1
        }
    }

    /// 获取同一三角形内的上一条半边
    #[inline]
    pub fn prev_halfedge(he: u32) -> u32 {
        if he % 3 == 0 {
            he + 2
        } else {
            he - 1
        }
    }

    /// 顶点是否参与了三角剖分（重复点不参与）
    #[inline]
    pub fn is_connected(&self, v: u32) -> bool {
        self.inedges
            .get(v as usize)
            .is_some_and(|&he| he != EMPTY)
    }

    // ========================================================================
    // 顶点周围遍历
    // ========================================================================

    /// 顶点 v 的所有 Delaunay 邻居（逆时针顺序）
    ///
    /// 从入边出发：入边的起点是一个邻居，其下一条半边是从 v 出发的出边，
    /// 出边的 twin 又是一条入边。遇到凸包边界时出边的终点是最后一个邻居。
    pub fn neighbors(&self, v: u32) -> Vec<u32> {
        let mut result = Vec::new();
        let start = match self.inedges.get(v as usize) {
            Some(&he) if he != EMPTY => he,
            _ => return result,
        };

        let mut incoming = start;
        loop {
            result.push(self.triangles[incoming as usize]);
            let outgoing = Self::next_halfedge(incoming);
            let twin = self.halfedges[outgoing as usize];
            if twin == EMPTY {
                let last = self.triangles[Self::next_halfedge(outgoing) as usize];
                if result.first() != Some(&last) {
                    result.push(last);
                }
                break;
            }
            incoming = twin;
            if incoming == start {
                break;
            }
        }

        result
    }

    /// 从 `start` 出发沿 Delaunay 邻居贪心前进，返回离 `pos` 最近的顶点
    ///
    /// Delaunay 图上的贪心下降总能到达最近点。`start` 未参与剖分时原样返回。
    pub fn walk_to_nearest(&self, pos: Pos2, start: u32) -> u32 {
        let mut current = start;
        let mut best = (self.points[current as usize] - pos).length_sq();
        loop {
            let mut moved = false;
            for n in self.neighbors(current) {
                let d = (self.points[n as usize] - pos).length_sq();
                if d < best {
                    best = d;
                    current = n;
                    moved = true;
                }
            }
            if !moved {
                return current;
            }
        }
    }
}

// ============================================================================
// 测试
// ============================================================================
