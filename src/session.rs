//! One game session: every piece of mutable game state, wired together.

use std::time::Duration;

use log::{debug, info};
use macroquad::prelude::Vec2;
use rand::rngs::StdRng;

use crate::audio::{AudioBackend, AudioFeedback, Cue};
use crate::board::BoardGeometry;
use crate::engine::{Engine, Phase, TickOutcome};
use crate::input::{InputMapper, Intent};
use crate::render::{Surface, render};
use crate::schedule::{FrameScheduler, LoopController, Scheduler, tick_interval};
use crate::settings::{Settings, clamp_density, clamp_speed};

/// Board size used until the window reports a usable one.
pub const DEFAULT_VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

fn usable(viewport: Vec2) -> bool {
    viewport.x > 0.0 && viewport.y > 0.0
}

pub struct GameSession<A> {
    settings: Settings,
    viewport: Vec2,
    geometry: BoardGeometry,
    engine: Engine,
    input: InputMapper,
    scheduler: FrameScheduler,
    controller: LoopController,
    audio: AudioFeedback<A>,
    rng: StdRng,
    /// Final score of the last game, shown until dismissed.
    game_over_notice: Option<u32>,
}

impl<A: AudioBackend> GameSession<A> {
    /// Builds an idle session. A zero-sized `viewport` falls back to
    /// [`DEFAULT_VIEWPORT`].
    pub fn new(settings: Settings, viewport: Vec2, backend: A, mut rng: StdRng) -> Self {
        let viewport = if usable(viewport) { viewport } else { DEFAULT_VIEWPORT };
        let settings = settings.sanitized();
        let geometry = BoardGeometry::compute(viewport, settings.density);
        let engine = Engine::new(&geometry, &mut rng);
        let audio = AudioFeedback::new(backend, settings.muted, settings.volume);
        Self {
            settings,
            viewport,
            geometry,
            engine,
            input: InputMapper::new(),
            scheduler: FrameScheduler::new(),
            controller: LoopController::new(),
            audio,
            rng,
            game_over_notice: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    pub fn input(&self) -> &InputMapper {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputMapper {
        &mut self.input
    }

    pub fn audio(&self) -> &AudioFeedback<A> {
        &self.audio
    }

    pub fn controller(&self) -> &LoopController {
        &self.controller
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    /// Installs an engine built elsewhere, typically with
    /// [`Engine::with_state`] to resume a saved or scripted position. Timer
    /// and audio state are left as they are.
    pub fn replace_engine(&mut self, engine: Engine) {
        self.engine = engine;
    }

    pub fn game_over_notice(&self) -> Option<u32> {
        self.game_over_notice
    }

    /// Starts a new game from idle or game over; resumes a paused one.
    pub fn start(&mut self) {
        match self.engine.phase() {
            Phase::Idle | Phase::GameOver => self.restart(),
            Phase::Paused => self.engine.resume(),
            Phase::Running => {}
        }
    }

    /// Full reinitialisation into a running game, from any phase.
    pub fn restart(&mut self) {
        self.game_over_notice = None;
        self.input.reset();
        self.engine.restart(&self.geometry, &mut self.rng);
        self.arm();
        info!(
            "game started on a {}x{} board at speed {}",
            self.geometry.cols, self.geometry.rows, self.settings.speed
        );
    }

    pub fn toggle_pause(&mut self) -> Phase {
        let phase = self.engine.toggle_pause();
        debug!("pause toggled, now {:?}", phase);
        phase
    }

    /// Hides the game-over notice without starting anything.
    pub fn dismiss_game_over(&mut self) {
        self.game_over_notice = None;
    }

    pub fn handle_intent(&mut self, intent: Intent) {
        match intent {
            Intent::Turn(dir) => self.input.turn(dir),
            Intent::TogglePause => {
                let _ = self.toggle_pause();
            }
        }
    }

    fn loop_active(&self) -> bool {
        matches!(self.engine.phase(), Phase::Running | Phase::Paused)
    }

    fn arm(&mut self) {
        self.controller.start(&mut self.scheduler, tick_interval(self.settings.speed));
        self.audio.start_background();
    }

    /// New interval applies immediately; the game itself is untouched.
    pub fn set_speed(&mut self, speed: u32) {
        self.settings.speed = clamp_speed(speed);
        debug!("speed set to {}", self.settings.speed);
        if self.loop_active() {
            self.controller.start(&mut self.scheduler, tick_interval(self.settings.speed));
        }
    }

    /// Changing the grid resets the game.
    pub fn set_density(&mut self, density: u32) {
        self.settings.density = clamp_density(density);
        debug!("density set to {}", self.settings.density);
        self.rebuild_board();
    }

    /// Zero-sized viewports (minimised windows) are ignored.
    pub fn resize(&mut self, viewport: Vec2) {
        if !usable(viewport) {
            return;
        }
        self.viewport = viewport;
        self.rebuild_board();
    }

    fn rebuild_board(&mut self) {
        self.geometry = BoardGeometry::compute(self.viewport, self.settings.density);
        self.controller.stop(&mut self.scheduler);
        self.input.reset();
        self.engine.reset(&self.geometry, &mut self.rng);
        if self.loop_active() {
            self.arm();
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
        self.audio.set_muted(muted);
        if !muted && self.controller.is_running() {
            self.audio.start_background();
        }
    }

    pub fn toggle_mute(&mut self) -> bool {
        let muted = !self.settings.muted;
        self.set_muted(muted);
        muted
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.audio.set_volume(volume);
        self.settings.volume = self.audio.volume();
    }

    /// Feeds frame time to the scheduler and runs every tick that came due.
    pub fn advance(&mut self, elapsed: Duration) {
        for handle in self.scheduler.advance(elapsed) {
            if self.controller.owns(handle) {
                let _ = self.tick();
            }
        }
    }

    /// One simulation step plus its sound effects.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.engine.tick(&self.geometry, self.input.pending(), &mut self.rng);
        match outcome {
            TickOutcome::Ate { .. } => self.audio.play(Cue::Eat),
            TickOutcome::GameOver { final_score } => {
                self.controller.stop(&mut self.scheduler);
                self.audio.play(Cue::GameOver);
                self.audio.stop_background();
                self.game_over_notice = Some(final_score);
                info!("game over with score {}", final_score);
            }
            TickOutcome::Moved | TickOutcome::Skipped => {}
        }
        outcome
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        render(
            surface,
            &self.geometry,
            self.engine.snake(),
            self.engine.food(),
            self.engine.score(),
        );
    }
}
