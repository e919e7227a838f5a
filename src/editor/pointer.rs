use super::*;

/// What lies under the pointer. Vertex hits on any mask win over interior
/// hits, and earlier masks win over later ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Vertex {
        mask_index: usize,
        vertex_index: usize,
    },
    Interior {
        mask_index: usize,
    },
}

impl Hit {
    const fn cursor(self) -> CursorHint {
        match self {
            Self::Vertex { .. } => CursorHint::Grab,
            Self::Interior { .. } => CursorHint::Move,
        }
    }
}

impl MaskEditor {
    pub fn hit_test(&self, point: AbsolutePoint) -> Option<Hit> {
        let pick_radius = self.config.pick_radius;
        let vertex = self.masks.iter().enumerate().find_map(|(mask_index, mask)| {
            mask.editable_vertex_at(point, pick_radius)
                .map(|vertex_index| Hit::Vertex {
                    mask_index,
                    vertex_index,
                })
        });
        vertex.or_else(|| {
            self.masks
                .iter()
                .position(|mask| mask.contains(point))
                .map(|mask_index| Hit::Interior { mask_index })
        })
    }

    /// Starts a vertex or shape drag when `point` hits a mask.
    pub fn pointer_down(&mut self, point: AbsolutePoint) -> Gesture {
        self.color_info = self.color_at(point);
        self.gesture = match self.hit_test(point) {
            Some(Hit::Vertex {
                mask_index,
                vertex_index,
            }) => Gesture::VertexDrag {
                mask_index,
                vertex_index,
            },
            Some(Hit::Interior { mask_index }) => Gesture::ShapeDrag {
                mask_index,
                last: point,
            },
            None => Gesture::Idle,
        };
        if self.gesture != Gesture::Idle {
            tracing::debug!(gesture = ?self.gesture, "drag started");
        }
        self.gesture
    }

    /// Updates the color read-out and advances the active drag. Returns
    /// whether the surface was repainted.
    pub fn pointer_move(&mut self, point: AbsolutePoint) -> bool {
        self.color_info = self.color_at(point);
        match self.gesture {
            Gesture::Idle => {
                self.hover = self
                    .hit_test(point)
                    .map_or(CursorHint::Default, Hit::cursor);
                false
            }
            Gesture::VertexDrag {
                mask_index,
                vertex_index,
            } => {
                let Some(mask) = self.masks.get_mut(mask_index) else {
                    self.gesture = Gesture::Idle;
                    return false;
                };
                if mask.scaled_points().get(vertex_index) == Some(&point) {
                    return false;
                }
                if !mask.move_vertex(vertex_index, point) {
                    return false;
                }
                self.render();
                true
            }
            Gesture::ShapeDrag { mask_index, last } => {
                let delta_x = point.x - last.x;
                let delta_y = point.y - last.y;
                if delta_x == 0.0 && delta_y == 0.0 {
                    return false;
                }
                let Some(mask) = self.masks.get_mut(mask_index) else {
                    self.gesture = Gesture::Idle;
                    return false;
                };
                mask.translate(delta_x, delta_y);
                self.gesture = Gesture::ShapeDrag {
                    mask_index,
                    last: point,
                };
                self.render();
                true
            }
        }
    }

    /// Commits the active drag.
    pub fn pointer_up(&mut self, point: AbsolutePoint) {
        if let Some(mask_index) = self.gesture.mask_index() {
            tracing::debug!(mask_index, "drag finished");
        }
        self.gesture = Gesture::Idle;
        self.hover = self
            .hit_test(point)
            .map_or(CursorHint::Default, Hit::cursor);
    }

    pub fn pointer_leave(&mut self) {
        self.color_info = None;
        self.gesture = Gesture::Idle;
        self.hover = CursorHint::Default;
    }

    pub fn cursor_hint(&self) -> CursorHint {
        match self.gesture {
            Gesture::Idle => self.hover,
            Gesture::VertexDrag { .. } => CursorHint::Grab,
            Gesture::ShapeDrag { .. } => CursorHint::Move,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::editor;
    use super::*;
    use crate::geometry::RelativePoint;
    use crate::mask::{template_by_shape, ShapeType, DEFAULT_CIRCLE_SEGMENTS};
    use crate::persist::{PersistedMask, PersistedMaskSet};

    fn square_editor() -> MaskEditor {
        let mut editor = editor(400);
        editor
            .load_persisted(&PersistedMaskSet {
                value: 80.0,
                masks: vec![PersistedMask {
                    original_points: vec![
                        RelativePoint::new(-0.5, -0.5),
                        RelativePoint::new(0.5, -0.5),
                        RelativePoint::new(0.5, 0.5),
                        RelativePoint::new(-0.5, 0.5),
                    ],
                    scale: 1.0,
                    shape_type: ShapeType::Square,
                }],
            })
            .expect("valid set");
        editor
    }

    fn add_shape(editor: &mut MaskEditor, shape_type: ShapeType) {
        let template =
            template_by_shape(&shape_type, DEFAULT_CIRCLE_SEGMENTS).expect("builtin template");
        editor.select_template(&template).expect("under the cap");
    }

    #[test]
    fn dragging_a_corner_moves_only_that_corner() {
        let mut editor = square_editor();

        let gesture = editor.pointer_down(AbsolutePoint::new(300.0, 100.0));
        assert_eq!(
            gesture,
            Gesture::VertexDrag {
                mask_index: 0,
                vertex_index: 1
            }
        );
        assert!(editor.pointer_move(AbsolutePoint::new(320.0, 80.0)));
        editor.pointer_up(AbsolutePoint::new(320.0, 80.0));

        let mask = &editor.masks()[0];
        assert_eq!(editor.gesture(), Gesture::Idle);
        assert_eq!(mask.scale(), 1.0);
        assert_eq!(
            mask.original_points(),
            &[
                AbsolutePoint::new(100.0, 100.0),
                AbsolutePoint::new(320.0, 80.0),
                AbsolutePoint::new(300.0, 300.0),
                AbsolutePoint::new(100.0, 300.0),
            ]
        );
    }

    #[test]
    fn vertex_within_pick_radius_starts_vertex_drag() {
        let mut editor = square_editor();
        assert!(matches!(
            editor.pointer_down(AbsolutePoint::new(108.0, 100.0)),
            Gesture::VertexDrag { vertex_index: 0, .. }
        ));
        editor.pointer_up(AbsolutePoint::new(108.0, 100.0));

        assert!(matches!(
            editor.pointer_down(AbsolutePoint::new(120.0, 100.0)),
            Gesture::ShapeDrag { mask_index: 0, .. }
        ));
    }

    #[test]
    fn dragging_interior_translates_whole_mask() {
        let mut editor = square_editor();
        editor.set_scale(0.5).expect("positive scale");

        editor.pointer_down(AbsolutePoint::new(200.0, 200.0));
        assert!(editor.pointer_move(AbsolutePoint::new(210.0, 195.0)));
        assert!(editor.pointer_move(AbsolutePoint::new(230.0, 200.0)));
        editor.pointer_up(AbsolutePoint::new(230.0, 200.0));

        let mask = &editor.masks()[0];
        assert_eq!(mask.scale(), 0.5);
        assert_eq!(mask.original_points()[0], AbsolutePoint::new(130.0, 100.0));
        assert_eq!(mask.scaled_points()[0], AbsolutePoint::new(180.0, 150.0));
    }

    #[test]
    fn pointer_down_outside_masks_stays_idle() {
        let mut editor = square_editor();
        let generation = editor.render_generation();

        assert_eq!(editor.pointer_down(AbsolutePoint::new(20.0, 20.0)), Gesture::Idle);
        assert!(!editor.pointer_move(AbsolutePoint::new(40.0, 40.0)));
        assert_eq!(editor.masks()[0].original_points()[0], AbsolutePoint::new(100.0, 100.0));
        assert_eq!(editor.render_generation(), generation);
    }

    #[test]
    fn circle_vertices_only_start_shape_drags() {
        let mut editor = editor(400);
        add_shape(&mut editor, ShapeType::Circle);

        let gesture = editor.pointer_down(AbsolutePoint::new(255.0, 200.0));

        assert!(matches!(gesture, Gesture::ShapeDrag { mask_index: 0, .. }));
        assert_eq!(editor.cursor_hint(), CursorHint::Move);
    }

    #[test]
    fn vertex_hits_win_over_earlier_interiors() {
        let mut editor = square_editor();
        add_shape(&mut editor, ShapeType::Triangle);

        assert_eq!(
            editor.hit_test(AbsolutePoint::new(200.0, 120.0)),
            Some(Hit::Vertex {
                mask_index: 1,
                vertex_index: 0
            })
        );
        assert_eq!(
            editor.hit_test(AbsolutePoint::new(200.0, 200.0)),
            Some(Hit::Interior { mask_index: 0 })
        );
    }

    #[test]
    fn idle_hover_updates_cursor_without_repainting() {
        let mut editor = square_editor();
        let generation = editor.render_generation();

        assert!(!editor.pointer_move(AbsolutePoint::new(102.0, 101.0)));
        assert_eq!(editor.cursor_hint(), CursorHint::Grab);
        assert!(!editor.pointer_move(AbsolutePoint::new(200.0, 200.0)));
        assert_eq!(editor.cursor_hint(), CursorHint::Move);
        assert!(!editor.pointer_move(AbsolutePoint::new(20.0, 380.0)));
        assert_eq!(editor.cursor_hint(), CursorHint::Default);
        assert_eq!(editor.render_generation(), generation);
    }

    #[test]
    fn pointer_move_tracks_color_info() {
        let mut editor = square_editor();

        editor.pointer_move(AbsolutePoint::new(200.0, 100.0));
        let info = *editor.color_info().expect("point is on the wheel");
        assert!(info.hue.abs() < 1e-9);
        assert_eq!(info.value, 80.0);
        assert_eq!((info.x, info.y), (200.0, 100.0));

        editor.pointer_move(AbsolutePoint::new(1.0, 1.0));
        assert!(editor.color_info().is_none());
    }

    #[test]
    fn pointer_leave_cancels_drag_and_clears_read_out() {
        let mut editor = square_editor();
        editor.pointer_down(AbsolutePoint::new(200.0, 200.0));
        assert!(editor.color_info().is_some());

        editor.pointer_leave();

        assert_eq!(editor.gesture(), Gesture::Idle);
        assert!(editor.color_info().is_none());
        assert_eq!(editor.cursor_hint(), CursorHint::Default);
        assert!(!editor.pointer_move(AbsolutePoint::new(220.0, 220.0)));
        assert_eq!(editor.masks()[0].original_points()[0], AbsolutePoint::new(100.0, 100.0));
    }

    #[test]
    fn each_drag_step_repaints_once() {
        let mut editor = square_editor();
        let generation = editor.render_generation();

        editor.pointer_down(AbsolutePoint::new(300.0, 300.0));
        editor.pointer_move(AbsolutePoint::new(310.0, 310.0));
        editor.pointer_move(AbsolutePoint::new(310.0, 310.0));
        editor.pointer_move(AbsolutePoint::new(305.0, 320.0));

        assert_eq!(editor.render_generation(), generation + 2);
    }
}
