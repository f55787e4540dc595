//! Macroquad input adapter, on-screen direction pad and HUD overlays.

use macroquad::prelude::*;

use crate::audio::AudioBackend;
use crate::board::Direction;
use crate::engine::Phase;
use crate::render::{Surface, SCORE_TEXT, SNAKE_LIGHT};
use crate::session::GameSession;

/// The direction pad is only shown on viewports narrower than this.
pub const TOUCH_PAD_MAX_WIDTH: f32 = 900.0;
const PAD_BUTTON: f32 = 56.0;
const PAD_GAP: f32 = 8.0;
const VOLUME_STEP: f32 = 0.1;

const OVERLAY_DIM: Color = Color::new(0.0, 0.0, 0.0, 0.55);
const PAD_FILL: Color = Color::new(0.42, 1.0, 0.0, 0.15);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Four labelled buttons laid out as an inverted T in the bottom-right corner.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectionPad {
    buttons: [(Direction, Rect); 4],
}

impl DirectionPad {
    pub fn layout(viewport: Vec2) -> Self {
        let step = PAD_BUTTON + PAD_GAP;
        let left = viewport.x - 3.0 * step;
        let bottom = viewport.y - step;
        Self {
            buttons: [
                (Direction::Up, Rect::new(left + step, bottom - step, PAD_BUTTON, PAD_BUTTON)),
                (Direction::Left, Rect::new(left, bottom, PAD_BUTTON, PAD_BUTTON)),
                (Direction::Down, Rect::new(left + step, bottom, PAD_BUTTON, PAD_BUTTON)),
                (Direction::Right, Rect::new(left + 2.0 * step, bottom, PAD_BUTTON, PAD_BUTTON)),
            ],
        }
    }

    pub fn visible(viewport: Vec2) -> bool {
        viewport.x < TOUCH_PAD_MAX_WIDTH
    }

    /// Label of the button under `point`.
    pub fn hit(&self, point: Vec2) -> Option<&'static str> {
        self.buttons
            .iter()
            .find(|(_, rect)| rect.contains(point))
            .map(|(dir, _)| dir.label())
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        for (dir, rect) in &self.buttons {
            surface.fill_rect(*rect, PAD_FILL);
            surface.stroke_rect(*rect, 2.0, SNAKE_LIGHT);
            let glyph = match dir {
                Direction::Up => "^",
                Direction::Down => "v",
                Direction::Left => "<",
                Direction::Right => ">",
            };
            surface.draw_text(glyph, rect.x + rect.w * 0.38, rect.y + rect.h * 0.65, 32.0, SNAKE_LIGHT);
        }
    }
}

/// Reads this frame's keyboard, touch and pad input into the session.
pub fn poll_input<A: AudioBackend>(session: &mut GameSession<A>, pad: Option<&DirectionPad>) -> Control {
    for key in get_keys_pressed() {
        if let Some(intent) = session.input_mut().key_down(key) {
            session.handle_intent(intent);
        }
        match key {
            KeyCode::Q => return Control::Quit,
            KeyCode::Enter => session.start(),
            KeyCode::R => session.restart(),
            KeyCode::Escape => session.dismiss_game_over(),
            KeyCode::M => {
                let _ = session.toggle_mute();
            }
            KeyCode::LeftBracket => session.set_speed(session.settings().speed.saturating_sub(1)),
            KeyCode::RightBracket => session.set_speed(session.settings().speed + 1),
            KeyCode::Minus => session.set_density(session.settings().density.saturating_sub(1)),
            KeyCode::Equal => session.set_density(session.settings().density + 1),
            KeyCode::Key9 => session.set_volume(session.settings().volume - VOLUME_STEP),
            KeyCode::Key0 => session.set_volume(session.settings().volume + VOLUME_STEP),
            _ => {}
        }
    }

    let mut pad_pressed = false;
    if let Some(pad) = pad {
        if is_mouse_button_pressed(MouseButton::Left) {
            if let Some(label) = pad.hit(mouse_position().into()) {
                pad_pressed = session.input_mut().press_button(label);
            }
        }
    }

    for touch in touches() {
        match touch.phase {
            TouchPhase::Started if !pad_pressed => session.input_mut().touch_start(touch.position),
            TouchPhase::Ended => {
                let _ = session.input_mut().touch_end(touch.position);
            }
            TouchPhase::Cancelled => session.input_mut().cancel_touch(),
            _ => {}
        }
    }

    Control::Continue
}

fn centered<S: Surface + ?Sized>(surface: &mut S, text: &str, y: f32, size: f32, color: Color) {
    let width = measure_text(text, None, size as u16, 1.0).width;
    surface.draw_text(text, (screen_width() - width) * 0.5, y, size, color);
}

/// Settings line, phase banners and the game-over notice.
pub fn draw_hud<S: Surface + ?Sized, A: AudioBackend>(surface: &mut S, session: &GameSession<A>) {
    let settings = session.settings();
    let sw = screen_width();
    let sh = screen_height();

    let status = format!(
        "Speed {}  Grid {}  {}  Vol {:>3}%",
        settings.speed,
        settings.density,
        if settings.muted { "Muted" } else { "Sound" },
        (settings.volume * 100.0).round() as i32,
    );
    surface.draw_text(&status, 8.0, sh - 12.0, 18.0, GRAY);

    match session.phase() {
        Phase::Idle => {
            centered(surface, "Enter: Start   Arrows/WASD/Swipe: Move   Space: Pause", sh * 0.5, 22.0, SCORE_TEXT);
            centered(surface, "[ / ]: Speed   - / =: Grid   M: Mute   9 / 0: Volume   Q: Quit", sh * 0.5 + 28.0, 18.0, GRAY);
        }
        Phase::Paused => centered(surface, "PAUSED", sh * 0.5, 40.0, SCORE_TEXT),
        Phase::Running | Phase::GameOver => {}
    }

    if let Some(score) = session.game_over_notice() {
        surface.fill_rect(Rect::new(0.0, 0.0, sw, sh), OVERLAY_DIM);
        centered(surface, "GAME OVER", sh * 0.4, 40.0, SNAKE_LIGHT);
        centered(surface, &format!("Score: {}", score), sh * 0.4 + 44.0, 28.0, WHITE);
        centered(surface, "R: Restart   Esc: Close", sh * 0.4 + 80.0, 20.0, GRAY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_hits_each_button() {
        let pad = DirectionPad::layout(vec2(400.0, 800.0));
        let step = PAD_BUTTON + PAD_GAP;
        let left = 400.0 - 3.0 * step;
        let bottom = 800.0 - step;
        let half = PAD_BUTTON * 0.5;
        assert_eq!(pad.hit(vec2(left + half, bottom + half)), Some("left"));
        assert_eq!(pad.hit(vec2(left + step + half, bottom + half)), Some("down"));
        assert_eq!(pad.hit(vec2(left + 2.0 * step + half, bottom + half)), Some("right"));
        assert_eq!(pad.hit(vec2(left + step + half, bottom - step + half)), Some("up"));
        assert_eq!(pad.hit(vec2(10.0, 10.0)), None);
    }

    #[test]
    fn pad_only_on_narrow_viewports() {
        assert!(DirectionPad::visible(vec2(600.0, 900.0)));
        assert!(!DirectionPad::visible(vec2(1280.0, 720.0)));
    }
}
