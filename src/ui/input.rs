//! 画布交互：拖动平移、滚轮/捏合缩放、缩放按钮
//!
//! 状态机与 egui 解耦：`pointer_down` / `pointer_move` / `wheel` 等方法只修改
//! [`ViewState`]，`update` 负责把 egui 的输入翻译成这些调用。

use egui::{Pos2, Rect, Response, Vec2};

use crate::view::ViewState;

/// 滚轮每单位增量对应的缩放比例
pub const WHEEL_ZOOM_RATE: f32 = 0.001;

/// 缩放按钮的步长
pub const ZOOM_STEP: f32 = 1.2;

/// 拖动状态
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    /// 空闲状态 - 等待新的输入
    Idle,

    /// 拖动状态 - 用户按住指针平移画布
    Dragging { last_cursor_pos: Pos2 },
}

/// 交互控制器，仅处理画布平移和缩放
#[derive(Debug)]
pub struct InteractionController {
    /// 当前拖动状态
    pub state: DragState,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionController {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
        }
    }

    /// 转换到新状态
    fn transition_to(&mut self, new_state: DragState) {
        log::debug!("交互状态: {:?} -> {:?}", self.state, new_state);
        self.state = new_state;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    // ========================================================================
    // 状态机
    // ========================================================================

    /// 在画布上按下指针，开始拖动
    pub fn pointer_down(&mut self, pos: Pos2) {
        self.transition_to(DragState::Dragging {
            last_cursor_pos: pos,
        });
    }

    /// 指针移动；拖动中按光标位移平移，返回视图是否改变
    pub fn pointer_move(&mut self, pos: Pos2, view: &mut ViewState) -> bool {
        let DragState::Dragging { last_cursor_pos } = self.state else {
            return false;
        };
        let delta = pos - last_cursor_pos;
        self.state = DragState::Dragging {
            last_cursor_pos: pos,
        };
        if delta == Vec2::ZERO {
            return false;
        }
        view.pan_by(delta);
        true
    }

    /// 释放指针，回到空闲
    pub fn pointer_up(&mut self) {
        if self.is_dragging() {
            self.transition_to(DragState::Idle);
        }
    }

    /// 滚轮缩放，`delta_y` 为正表示缩小（向下滚动），以光标为锚点
    pub fn wheel(&mut self, delta_y: f32, cursor: Pos2, view: &mut ViewState) {
        // 大步滚动时因子不能降到 0 以下，否则缩放会被忽略
        let factor = (1.0 - delta_y * WHEEL_ZOOM_RATE).max(f32::EPSILON);
        view.zoom_at(cursor, factor);
    }

    /// 双指捏合，`factor` 为两指距离之比，以手势中心为锚点
    pub fn pinch(&mut self, factor: f32, center: Pos2, view: &mut ViewState) {
        view.zoom_at(center, factor);
    }

    /// 以画布中心放大
    pub fn zoom_in(&mut self, canvas_size: Vec2, view: &mut ViewState) {
        view.zoom_at((canvas_size / 2.0).to_pos2(), ZOOM_STEP);
    }

    /// 以画布中心缩小
    pub fn zoom_out(&mut self, canvas_size: Vec2, view: &mut ViewState) {
        view.zoom_at((canvas_size / 2.0).to_pos2(), 1.0 / ZOOM_STEP);
    }

    pub fn reset_view(&mut self, view: &mut ViewState) {
        view.reset();
    }

    // ========================================================================
    // egui 输入
    // ========================================================================

    /// 每帧把 egui 输入翻译成状态机调用，坐标转换为画布局部坐标
    pub fn update(&mut self, ui: &egui::Ui, response: &Response, view: &mut ViewState) {
        let canvas: Rect = response.rect;
        let to_local = |p: Pos2| (p - canvas.min).to_pos2();

        // 拖动
        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.pointer_down(to_local(pos));
            }
        }
        if self.is_dragging() {
            if let Some(pos) = ui.input(|i| i.pointer.latest_pos()) {
                self.pointer_move(to_local(pos), view);
            }
        }
        if response.drag_stopped() || (self.is_dragging() && !ui.input(|i| i.pointer.any_down())) {
            self.pointer_up();
        }

        // 缩放
        if response.hovered() {
            let (multi_touch, zoom_delta, scroll_y, hover) = ui.input(|i| {
                (
                    i.multi_touch(),
                    i.zoom_delta(),
                    i.raw_scroll_delta.y,
                    i.pointer.hover_pos(),
                )
            });

            if let Some(touch) = multi_touch {
                if touch.zoom_delta != 1.0 {
                    self.pinch(touch.zoom_delta, to_local(touch.center_pos), view);
                }
            } else if zoom_delta != 1.0 {
                // 触控板捏合或 Ctrl+滚轮
                let anchor = hover.map_or((canvas.size() / 2.0).to_pos2(), to_local);
                self.pinch(zoom_delta, anchor, view);
            } else if scroll_y != 0.0 {
                // egui 的滚动方向与 DOM 相反
                let anchor = hover.map_or((canvas.size() / 2.0).to_pos2(), to_local);
                self.wheel(-scroll_y, anchor, view);
            }
        }

        let cursor = if self.is_dragging() {
            egui::CursorIcon::Grabbing
        } else if response.hovered() {
            egui::CursorIcon::Grab
        } else {
            return;
        };
        ui.ctx().set_cursor_icon(cursor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_pans_by_cursor_delta() {
        let mut controller = InteractionController::new();
        let mut view = ViewState::default();

        assert!(!controller.pointer_move(Pos2::new(5.0, 5.0), &mut view));
        assert_eq!(view.pan, Vec2::ZERO);

        controller.pointer_down(Pos2::new(10.0, 10.0));
        assert!(controller.is_dragging());
        assert!(controller.pointer_move(Pos2::new(25.0, 5.0), &mut view));
        assert!(controller.pointer_move(Pos2::new(30.0, 0.0), &mut view));
        assert_eq!(view.pan, Vec2::new(20.0, -10.0));

        controller.pointer_up();
        assert_eq!(controller.state, DragState::Idle);
        assert!(!controller.pointer_move(Pos2::new(100.0, 100.0), &mut view));
        assert_eq!(view.pan, Vec2::new(20.0, -10.0));
    }

    #[test]
    fn test_wheel_direction_and_anchor() {
        let mut controller = InteractionController::new();
        let mut view = ViewState::default();
        let cursor = Pos2::new(200.0, 150.0);

        controller.wheel(100.0, cursor, &mut view);
        assert!((view.zoom - 0.9).abs() < 1e-6);
        controller.wheel(-300.0, cursor, &mut view);
        assert!(view.zoom > 1.0);
        assert!((view.to_world(cursor) - cursor).length() < 1e-3);
    }

    #[test]
    fn test_large_wheel_step_clamps_to_min_zoom() {
        let mut controller = InteractionController::new();
        let mut view = ViewState::default();
        let cursor = Pos2::new(120.0, 80.0);

        controller.wheel(1000.0, cursor, &mut view);
        assert_eq!(view.zoom, crate::view::MIN_ZOOM);
        controller.wheel(1.0e6, cursor, &mut view);
        assert_eq!(view.zoom, crate::view::MIN_ZOOM);
        assert!((view.to_world(cursor) - cursor).length() < 1e-2);
    }

    #[test]
    fn test_buttons_zoom_at_centre() {
        let mut controller = InteractionController::new();
        let mut view = ViewState::default();
        let size = Vec2::new(800.0, 600.0);
        let centre = Pos2::new(400.0, 300.0);

        controller.zoom_in(size, &mut view);
        assert!((view.zoom - ZOOM_STEP).abs() < 1e-6);
        assert!((view.to_world(centre) - centre).length() < 1e-3);

        controller.zoom_out(size, &mut view);
        controller.zoom_out(size, &mut view);
        assert!((view.zoom - 1.0 / ZOOM_STEP).abs() < 1e-5);

        for _ in 0..20 {
            controller.zoom_in(size, &mut view);
        }
        assert_eq!(view.zoom, crate::view::MAX_ZOOM);

        controller.reset_view(&mut view);
        assert_eq!(view, ViewState::default());
    }

    #[test]
    fn test_pinch_clamps() {
        let mut controller = InteractionController::new();
        let mut view = ViewState::default();
        controller.pinch(0.1, Pos2::new(50.0, 50.0), &mut view);
        assert_eq!(view.zoom, crate::view::MIN_ZOOM);
    }
}
