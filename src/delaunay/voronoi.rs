//! Voronoi 单元格多边形
//!
//! 单元格按需计算：从裁剪矩形出发，依次用站点与每个 Delaunay 邻居的
//! 垂直平分线切割（Sutherland-Hodgman）。结果是凸多边形，顶点按裁剪顺序排列。
//!
//! 邻居集合完整时，结果与全量 Voronoi 图中的单元格一致（限定在矩形内）。

use egui::{Pos2, Rect};

/// 计算站点 `site` 的 Voronoi 单元格并裁剪到 `clip`
///
/// `others` 是参与切割的其他站点；通常为 Delaunay 邻居，
/// 退化输入时可以传入全部点。与站点重合的点被忽略。
pub fn cell_polygon(site: Pos2, others: impl IntoIterator<Item = Pos2>, clip: Rect) -> Vec<Pos2> {
    let mut polygon = vec![
        clip.left_top(),
        clip.right_top(),
        clip.right_bottom(),
        clip.left_bottom(),
    ];

    for other in others {
        if other == site {
            continue;
        }
        polygon = clip_to_half_plane(&polygon, site, other);
        if polygon.is_empty() {
            break;
        }
    }

    polygon
}

/// 保留多边形中离 `site` 不比离 `other` 远的部分
fn clip_to_half_plane(polygon: &[Pos2], site: Pos2, other: Pos2) -> Vec<Pos2> {
    let mid = site + (other - site) * 0.5;
    let normal = other - site;
    // <= 0 表示在 site 一侧
    let side = |p: Pos2| (p - mid).dot(normal);

    let mut result = Vec::with_capacity(polygon.len() + 1);
    for (i, &current) in polygon.iter().enumerate() {
        let next = polygon[(i + 1) % polygon.len()];
        let (sc, sn) = (side(current), side(next));

        if sc <= 0.0 {
            result.push(current);
        }
        if (sc < 0.0 && sn > 0.0) || (sc > 0.0 && sn < 0.0) {
            let t = sc / (sc - sn);
            result.push(current + (next - current) * t);
        }
    }

    result
}

/// 多边形面积（鞋带公式，取绝对值）
pub fn polygon_area(polygon: &[Pos2]) -> f32 {
    let mut twice = 0.0;
    for (i, a) in polygon.iter().enumerate() {
        let b = polygon[(i + 1) % polygon.len()];
        twice += a.x * b.y - b.x * a.y;
    }
    twice.abs() * 0.5
}
