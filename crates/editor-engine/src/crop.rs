//! Interactive crop editing: pointer-drag sessions over a crop rectangle.
//!
//! The editor works on a draft rectangle; nothing touches the live project
//! until the caller confirms and writes the draft into
//! `background.crop`. All drag math is relative to the state captured at
//! pointer-down, never the live rectangle, so rounding can not accumulate
//! across pointer-move events.

use reelcut_project_model::geometry::{clamp_f64, CropRect, XY, MIN_CROP_SIZE};

/// Horizontal side of a corner handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XSide {
    Left,
    Right,
}

/// Vertical side of a corner handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YSide {
    Top,
    Bottom,
}

/// A corner handle on the crop rectangle.
///
/// Behavior per axis is derived from the side, not stored: the left/top
/// side moves the position and inversely resizes (anchoring the opposite
/// edge), the right/bottom side resizes only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handle {
    pub x: XSide,
    pub y: YSide,
}

impl Handle {
    pub const TOP_LEFT: Handle = Handle {
        x: XSide::Left,
        y: YSide::Top,
    };
    pub const TOP_RIGHT: Handle = Handle {
        x: XSide::Right,
        y: YSide::Top,
    };
    pub const BOTTOM_LEFT: Handle = Handle {
        x: XSide::Left,
        y: YSide::Bottom,
    };
    pub const BOTTOM_RIGHT: Handle = Handle {
        x: XSide::Right,
        y: YSide::Bottom,
    };
}

/// What a pointer-down grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    /// A corner handle.
    Handle(Handle),
    /// The rectangle body: translate position, size fixed.
    Body,
}

/// Per-axis drag behavior.
#[derive(Debug, Clone, Copy)]
enum AxisRule {
    /// Position follows the pointer, size inversely resizes.
    MoveAndResize,
    /// Position fixed, only size changes.
    ResizeOnly,
}

fn x_rule(side: XSide) -> AxisRule {
    match side {
        XSide::Left => AxisRule::MoveAndResize,
        XSide::Right => AxisRule::ResizeOnly,
    }
}

fn y_rule(side: YSide) -> AxisRule {
    match side {
        YSide::Top => AxisRule::MoveAndResize,
        YSide::Bottom => AxisRule::ResizeOnly,
    }
}

/// Ephemeral per-gesture state, captured at pointer-down and destroyed at
/// pointer-up.
#[derive(Debug, Clone)]
struct DragSession {
    origin_rect: CropRect,
    pointer_origin: XY,
    target: DragTarget,
    /// Screen-pixel to display-pixel ratio, captured once per gesture.
    ratio: XY,
}

/// Crop rectangle state plus the active drag session, if any.
#[derive(Debug)]
pub struct CropEditor {
    display: XY,
    rect: CropRect,
    drag: Option<DragSession>,
}

impl CropEditor {
    /// Open an editor over a display. `initial` is the saved crop, clamped
    /// defensively against the display bounds; `None` starts full-frame.
    pub fn new(display: XY, initial: Option<CropRect>) -> Self {
        let rect = initial
            .map(|r| r.clamp_to(display))
            .unwrap_or_else(|| CropRect::full(display));
        Self {
            display,
            rect,
            drag: None,
        }
    }

    pub fn rect(&self) -> CropRect {
        self.rect
    }

    pub fn display(&self) -> XY {
        self.display
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Start a drag gesture. `pointer` is in screen pixels; `element_size`
    /// is the rendered size of the on-screen crop area, used to convert
    /// screen deltas into display units.
    ///
    /// A stale session still registered at this point is torn down first so
    /// two sessions can never mutate the same rectangle.
    pub fn begin_drag(&mut self, target: DragTarget, pointer: XY, element_size: XY) {
        if self.drag.is_some() {
            tracing::warn!("pointer-down with a drag session still active; discarding stale session");
        }
        let ratio = XY::new(
            self.display.x / element_size.x,
            self.display.y / element_size.y,
        );
        self.drag = Some(DragSession {
            origin_rect: self.rect,
            pointer_origin: pointer,
            target,
            ratio,
        });
    }

    /// Pointer moved during a drag. Out-of-bounds deltas are clamped
    /// silently; clamping is the error-handling strategy here, not a
    /// reported failure.
    pub fn drag_to(&mut self, pointer: XY) {
        let Some(session) = &self.drag else {
            tracing::debug!("pointer-move without an active drag session");
            return;
        };

        let diff = (pointer - session.pointer_origin).scaled(session.ratio);
        let origin = session.origin_rect;

        self.rect = match session.target {
            DragTarget::Body => {
                let position = XY::new(
                    clamp_f64(origin.position.x + diff.x, 0.0, self.display.x - origin.size.x),
                    clamp_f64(origin.position.y + diff.y, 0.0, self.display.y - origin.size.y),
                );
                CropRect::new(position, origin.size)
            }
            DragTarget::Handle(handle) => {
                let (px, sx) = apply_axis(
                    x_rule(handle.x),
                    origin.position.x,
                    origin.size.x,
                    diff.x,
                    self.display.x,
                );
                let (py, sy) = apply_axis(
                    y_rule(handle.y),
                    origin.position.y,
                    origin.size.y,
                    diff.y,
                    self.display.y,
                );
                CropRect::new(XY::new(px, py), XY::new(sx, sy))
            }
        };
    }

    /// Pointer released (anywhere in the window). The rectangle stays at
    /// its last computed value; persisting it is the caller's decision.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Abnormal gesture termination (window blur, capture loss). Same
    /// teardown as a pointer-up.
    pub fn cancel_drag(&mut self) {
        if self.drag.take().is_some() {
            tracing::debug!("drag session cancelled");
        }
    }

    /// Replace the rectangle with the full display bounds. During an
    /// active drag this is a defensive no-op: the session still references
    /// the rectangle it captured.
    pub fn reset(&mut self) {
        if self.drag.is_some() {
            tracing::warn!("ignoring reset during an active drag");
            return;
        }
        self.rect = CropRect::full(self.display);
    }

    /// Replace the rectangle directly (numeric entry), outside a drag.
    pub fn set_rect(&mut self, rect: CropRect) {
        if self.drag.is_some() {
            tracing::warn!("ignoring set_rect during an active drag");
            return;
        }
        self.rect = rect.clamp_to(self.display);
    }
}

/// One axis of handle-drag math. Position and size are computed from the
/// same `diff` and independently clamped; neither clamp feeds back into
/// the other's inputs.
fn apply_axis(
    rule: AxisRule,
    origin_pos: f64,
    origin_size: f64,
    diff: f64,
    display: f64,
) -> (f64, f64) {
    match rule {
        AxisRule::ResizeOnly => (
            origin_pos,
            clamp_f64(origin_size + diff, MIN_CROP_SIZE, display - origin_pos),
        ),
        AxisRule::MoveAndResize => (
            clamp_f64(origin_pos + diff, 0.0, display - MIN_CROP_SIZE),
            clamp_f64(origin_size - diff, MIN_CROP_SIZE, display),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DISPLAY: XY = XY {
        x: 1920.0,
        y: 1080.0,
    };

    /// Identity mapping between screen and display pixels.
    fn begin(editor: &mut CropEditor, target: DragTarget, pointer: XY) {
        editor.begin_drag(target, pointer, editor.display());
    }

    #[test]
    fn test_top_left_drag_moves_and_shrinks() {
        let mut editor = CropEditor::new(DISPLAY, None);
        begin(&mut editor, DragTarget::Handle(Handle::TOP_LEFT), XY::new(0.0, 0.0));
        editor.drag_to(XY::new(50.0, 30.0));
        editor.end_drag();

        let rect = editor.rect();
        assert_eq!(rect.position, XY::new(50.0, 30.0));
        assert_eq!(rect.size, XY::new(1870.0, 1050.0));
    }

    #[test]
    fn test_bottom_right_drag_changes_size_only() {
        let initial = CropRect::new(XY::new(100.0, 100.0), XY::new(800.0, 600.0));
        let mut editor = CropEditor::new(DISPLAY, Some(initial));
        begin(
            &mut editor,
            DragTarget::Handle(Handle::BOTTOM_RIGHT),
            XY::new(900.0, 700.0),
        );
        editor.drag_to(XY::new(950.0, 730.0));
        editor.end_drag();

        let rect = editor.rect();
        assert_eq!(rect.position, XY::new(100.0, 100.0));
        assert_eq!(rect.size, XY::new(850.0, 630.0));
    }

    #[test]
    fn test_body_drag_clamps_to_display_edge() {
        let initial = CropRect::new(XY::new(0.0, 0.0), XY::new(500.0, 500.0));
        let mut editor = CropEditor::new(DISPLAY, Some(initial));
        begin(&mut editor, DragTarget::Body, XY::new(250.0, 250.0));
        editor.drag_to(XY::new(2250.0, 250.0));
        editor.end_drag();

        let rect = editor.rect();
        assert_eq!(rect.position, XY::new(1420.0, 0.0));
        assert_eq!(rect.size, XY::new(500.0, 500.0));
    }

    #[test]
    fn test_resize_only_respects_min_size() {
        let initial = CropRect::new(XY::new(100.0, 100.0), XY::new(800.0, 600.0));
        let mut editor = CropEditor::new(DISPLAY, Some(initial));
        begin(
            &mut editor,
            DragTarget::Handle(Handle::BOTTOM_RIGHT),
            XY::new(900.0, 700.0),
        );
        editor.drag_to(XY::new(-5000.0, -5000.0));
        editor.end_drag();

        let rect = editor.rect();
        assert_eq!(rect.position, XY::new(100.0, 100.0));
        assert_eq!(rect.size, XY::new(MIN_CROP_SIZE, MIN_CROP_SIZE));
    }

    #[test]
    fn test_top_right_mixes_axis_behaviors() {
        let initial = CropRect::new(XY::new(200.0, 200.0), XY::new(400.0, 400.0));
        let mut editor = CropEditor::new(DISPLAY, Some(initial));
        begin(
            &mut editor,
            DragTarget::Handle(Handle::TOP_RIGHT),
            XY::new(600.0, 200.0),
        );
        editor.drag_to(XY::new(650.0, 230.0));
        editor.end_drag();

        let rect = editor.rect();
        // x axis resize-only, y axis move-and-resize.
        assert_eq!(rect.position, XY::new(200.0, 230.0));
        assert_eq!(rect.size, XY::new(450.0, 370.0));
    }

    #[test]
    fn test_screen_to_display_ratio_scales_deltas() {
        let mut editor = CropEditor::new(DISPLAY, None);
        // The on-screen crop area is rendered at half the display size.
        editor.begin_drag(
            DragTarget::Handle(Handle::TOP_LEFT),
            XY::new(0.0, 0.0),
            XY::new(960.0, 540.0),
        );
        editor.drag_to(XY::new(25.0, 15.0));
        editor.end_drag();

        let rect = editor.rect();
        assert_eq!(rect.position, XY::new(50.0, 30.0));
        assert_eq!(rect.size, XY::new(1870.0, 1050.0));
    }

    #[test]
    fn test_deltas_are_relative_to_pointer_down() {
        let mut editor = CropEditor::new(DISPLAY, None);
        begin(&mut editor, DragTarget::Handle(Handle::TOP_LEFT), XY::new(0.0, 0.0));

        // Many intermediate moves must not accumulate.
        for i in 1..=10 {
            editor.drag_to(XY::new(5.0 * i as f64, 3.0 * i as f64));
        }
        editor.end_drag();

        let rect = editor.rect();
        assert_eq!(rect.position, XY::new(50.0, 30.0));
        assert_eq!(rect.size, XY::new(1870.0, 1050.0));
    }

    #[test]
    fn test_reset_restores_full_frame() {
        let initial = CropRect::new(XY::new(300.0, 200.0), XY::new(640.0, 480.0));
        let mut editor = CropEditor::new(DISPLAY, Some(initial));
        editor.reset();
        assert_eq!(editor.rect(), CropRect::full(DISPLAY));
    }

    #[test]
    fn test_reset_is_ignored_during_drag() {
        let mut editor = CropEditor::new(DISPLAY, None);
        begin(&mut editor, DragTarget::Body, XY::new(0.0, 0.0));
        editor.reset();
        assert!(editor.is_dragging());
        editor.end_drag();
    }

    #[test]
    fn test_new_pointer_down_discards_stale_session() {
        let initial = CropRect::new(XY::new(0.0, 0.0), XY::new(800.0, 600.0));
        let mut editor = CropEditor::new(DISPLAY, Some(initial));
        begin(&mut editor, DragTarget::Handle(Handle::TOP_LEFT), XY::new(0.0, 0.0));
        editor.drag_to(XY::new(50.0, 30.0));

        // Pointer-up was lost; the next pointer-down must start clean.
        begin(&mut editor, DragTarget::Body, XY::new(100.0, 100.0));
        editor.drag_to(XY::new(110.0, 100.0));
        editor.end_drag();

        let rect = editor.rect();
        assert_eq!(rect.position, XY::new(60.0, 30.0));
        assert_eq!(rect.size, XY::new(750.0, 570.0));
    }

    #[test]
    fn test_move_without_session_is_a_no_op() {
        let mut editor = CropEditor::new(DISPLAY, None);
        editor.drag_to(XY::new(500.0, 500.0));
        assert_eq!(editor.rect(), CropRect::full(DISPLAY));
    }

    proptest! {
        /// After any sequence of drags the crop invariants hold.
        #[test]
        fn prop_invariants_survive_drag_sequences(
            gestures in prop::collection::vec(
                (0u8..5, -3000.0f64..3000.0, -3000.0f64..3000.0),
                1..40,
            )
        ) {
            let mut editor = CropEditor::new(DISPLAY, None);
            for (target, dx, dy) in gestures {
                let target = match target {
                    0 => DragTarget::Handle(Handle::TOP_LEFT),
                    1 => DragTarget::Handle(Handle::TOP_RIGHT),
                    2 => DragTarget::Handle(Handle::BOTTOM_LEFT),
                    3 => DragTarget::Handle(Handle::BOTTOM_RIGHT),
                    _ => DragTarget::Body,
                };
                editor.begin_drag(target, XY::new(0.0, 0.0), DISPLAY);
                editor.drag_to(XY::new(dx, dy));
                editor.end_drag();

                prop_assert!(editor.rect().is_valid_for(DISPLAY));
            }
        }
    }
}
