/// Menu widgets.
use crate::entities::{Point, Rect};
use crate::platform::{Color, InputEvent, MouseButton};

#[derive(Clone, Debug, PartialEq)]
pub struct Button {
    pub rect: Rect,
    pub label: String,
    pub color: Color,
    pub hover_color: Color,
    pub hovered: bool,
}

impl Button {
    pub fn new(rect: Rect, label: impl Into<String>, color: Color, hover_color: Color) -> Self {
        Self {
            rect,
            label: label.into(),
            color,
            hover_color,
            hovered: false,
        }
    }

    pub fn check_hover(&mut self, pointer: Point) -> bool {
        self.hovered = self.rect.contains(pointer);
        self.hovered
    }

    /// True only for a primary-button press with the pointer inside.
    pub fn is_clicked(&self, pointer: Point, event: &InputEvent) -> bool {
        matches!(
            event,
            InputEvent::PointerDown {
                button: MouseButton::Primary,
                ..
            }
        ) && self.rect.contains(pointer)
    }

    pub fn fill(&self) -> Color {
        if self.hovered {
            self.hover_color
        } else {
            self.color
        }
    }
}
