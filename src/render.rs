//! Paints the board onto any [`Surface`].

use macroquad::prelude::*;

use crate::board::{BoardGeometry, Cell};
use crate::engine::Snake;

pub const BACKGROUND: Color = Color::new(0.027, 0.071, 0.008, 1.0); // #071202
pub const GRID_LINE: Color = Color::new(0.0, 0.0, 0.0, 0.03);
pub const FOOD: Color = Color::new(1.0, 0.835, 0.29, 1.0); // #ffd54a
pub const SNAKE_DARK: Color = Color::new(0.169, 0.353, 0.0, 1.0); // #2b5a00
pub const SNAKE_LIGHT: Color = Color::new(0.42, 1.0, 0.0, 1.0); // #6bff00
pub const SNAKE_OUTLINE: Color = Color::new(0.043, 0.125, 0.0, 1.0); // #0b2000
pub const SCORE_TEXT: Color = Color::new(0.749, 0.898, 0.655, 1.0); // #bfe5a7

const FOOD_INSET: f32 = 2.0;
const SEGMENT_INSET: f32 = 1.0;

/// Two-stop gradient running from the top-left to the bottom-right corner.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Gradient {
    pub from: Color,
    pub to: Color,
}

/// Minimal 2D drawing surface.
pub trait Surface {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn fill_gradient(&mut self, rect: Rect, gradient: Gradient);
    fn stroke_rect(&mut self, rect: Rect, thickness: f32, color: Color);
    /// `y` is the text baseline.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color);
}

pub fn score_font_size(geometry: &BoardGeometry) -> f32 {
    (geometry.cell_size as f32 - 6.0).max(12.0)
}

pub fn render<S: Surface + ?Sized>(
    surface: &mut S,
    geometry: &BoardGeometry,
    snake: &Snake,
    food: Option<Cell>,
    score: u32,
) {
    surface.clear(BACKGROUND);

    let cell = geometry.cell_size as f32;
    let board_h = geometry.rows as f32 * cell;
    for i in 0..geometry.cols {
        surface.stroke_rect(Rect::new(i as f32 * cell, 0.0, cell, board_h), 1.0, GRID_LINE);
    }

    if let Some(food) = food {
        surface.fill_rect(geometry.cell_rect(food, FOOD_INSET), FOOD);
    }

    for segment in snake.cells() {
        let rect = geometry.cell_rect(segment, SEGMENT_INSET);
        surface.fill_gradient(rect, Gradient { from: SNAKE_DARK, to: SNAKE_LIGHT });
        surface.stroke_rect(rect, 1.0, SNAKE_OUTLINE);
    }

    surface.draw_text(
        &format!("Score: {}", score),
        8.0,
        cell.min(28.0),
        score_font_size(geometry),
        SCORE_TEXT,
    );
}

/// Draws straight to the macroquad window.
#[derive(Debug, Default, Clone, Copy)]
pub struct MacroquadSurface;

impl Surface for MacroquadSurface {
    fn clear(&mut self, color: Color) {
        clear_background(color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        draw_rectangle(rect.x, rect.y, rect.w, rect.h, color);
    }

    fn fill_gradient(&mut self, rect: Rect, gradient: Gradient) {
        let mid = Color::new(
            (gradient.from.r + gradient.to.r) * 0.5,
            (gradient.from.g + gradient.to.g) * 0.5,
            (gradient.from.b + gradient.to.b) * 0.5,
            (gradient.from.a + gradient.to.a) * 0.5,
        );
        let (x0, y0, x1, y1) = (rect.x, rect.y, rect.x + rect.w, rect.y + rect.h);
        let mesh = Mesh {
            vertices: vec![
                Vertex::new(x0, y0, 0.0, 0.0, 0.0, gradient.from),
                Vertex::new(x1, y0, 0.0, 1.0, 0.0, mid),
                Vertex::new(x1, y1, 0.0, 1.0, 1.0, gradient.to),
                Vertex::new(x0, y1, 0.0, 0.0, 1.0, mid),
            ],
            indices: vec![0, 1, 2, 0, 2, 3],
            texture: None,
        };
        draw_mesh(&mesh);
    }

    fn stroke_rect(&mut self, rect: Rect, thickness: f32, color: Color) {
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, thickness, color);
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        macroquad::text::draw_text(text, x, y, size, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Op {
        Clear,
        Fill(Rect, Color),
        Gradient(Rect),
        Stroke(Rect),
        Text(String, f32, f32, f32),
    }

    #[derive(Default)]
    struct Recorder(Vec<Op>);

    impl Surface for Recorder {
        fn clear(&mut self, _color: Color) {
            self.0.push(Op::Clear);
        }
        fn fill_rect(&mut self, rect: Rect, color: Color) {
            self.0.push(Op::Fill(rect, color));
        }
        fn fill_gradient(&mut self, rect: Rect, _gradient: Gradient) {
            self.0.push(Op::Gradient(rect));
        }
        fn stroke_rect(&mut self, rect: Rect, _thickness: f32, _color: Color) {
            self.0.push(Op::Stroke(rect));
        }
        fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, _color: Color) {
            self.0.push(Op::Text(text.to_string(), x, y, size));
        }
    }

    fn geometry() -> BoardGeometry {
        BoardGeometry { cols: 10, rows: 10, cell_size: 20 }
    }

    #[test]
    fn paints_food_snake_and_score() {
        let mut surface = Recorder::default();
        let snake = Snake::from_cells([Cell::new(1, 1), Cell::new(0, 1)]).unwrap();
        render(&mut surface, &geometry(), &snake, Some(Cell::new(5, 5)), 7);

        assert_eq!(surface.0.first(), Some(&Op::Clear));
        assert!(surface.0.contains(&Op::Fill(Rect::new(102.0, 102.0, 16.0, 16.0), FOOD)));
        let segments: Vec<_> = surface.0.iter().filter(|op| matches!(op, Op::Gradient(_))).collect();
        assert_eq!(segments, vec![&Op::Gradient(Rect::new(21.0, 21.0, 18.0, 18.0)), &Op::Gradient(Rect::new(1.0, 21.0, 18.0, 18.0))]);
        let strokes: Vec<_> = surface.0.iter().filter(|op| matches!(op, Op::Stroke(_))).collect();
        assert_eq!(strokes.len(), 10 + 2);
        assert_eq!(strokes[0], &Op::Stroke(Rect::new(0.0, 0.0, 20.0, 200.0)));
        assert_eq!(strokes[9], &Op::Stroke(Rect::new(180.0, 0.0, 20.0, 200.0)));
        assert!(!surface.0.iter().any(|op| matches!(op, Op::Fill(_, c) if *c == GRID_LINE)));
        assert_eq!(surface.0.last(), Some(&Op::Text("Score: 7".to_string(), 8.0, 20.0, 14.0)));
    }

    #[test]
    fn missing_food_is_skipped() {
        let mut surface = Recorder::default();
        let snake = Snake::new(Cell::new(3, 3));
        render(&mut surface, &geometry(), &snake, None, 0);
        assert!(!surface.0.iter().any(|op| matches!(op, Op::Fill(_, c) if *c == FOOD)));
    }

    #[test]
    fn score_text_has_a_minimum_size() {
        let tiny = BoardGeometry { cols: 40, rows: 30, cell_size: 8 };
        assert_eq!(score_font_size(&tiny), 12.0);
        let big = BoardGeometry { cols: 10, rows: 10, cell_size: 50 };
        assert_eq!(score_font_size(&big), 44.0);
    }
}
