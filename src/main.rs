use std::fs::File;
use std::time::Duration;

use log::{LevelFilter, info, warn};
use macroquad::prelude::*;
use ::rand::SeedableRng;
use ::rand::rngs::StdRng;
use simplelog::{Config, WriteLogger};

use retro_snake::assets::load_cue_sounds;
use retro_snake::audio::MacroquadAudio;
use retro_snake::platform::{Control, DirectionPad, draw_hud, poll_input};
use retro_snake::render::MacroquadSurface;
use retro_snake::session::{DEFAULT_VIEWPORT, GameSession};
use retro_snake::settings::{SETTINGS_PATH, Settings};

const LOG_PATH: &str = "snake.log";

fn init_logging() {
    let result = File::create(LOG_PATH)
        .map_err(|err| err.to_string())
        .and_then(|file| WriteLogger::init(LevelFilter::Info, Config::default(), file).map_err(|err| err.to_string()));
    if let Err(err) = result {
        eprintln!("logging disabled: {}", err);
    }
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Retro Snake".to_owned(),
        window_width: DEFAULT_VIEWPORT.x as i32,
        window_height: DEFAULT_VIEWPORT.y as i32,
        high_dpi: true,
        window_resizable: true,
        ..Default::default()
    }
}

fn viewport() -> Vec2 {
    vec2(screen_width(), screen_height())
}

#[macroquad::main(window_conf)]
async fn main() {
    init_logging();
    info!("starting retro snake");

    let settings = Settings::load_or_default(SETTINGS_PATH);
    let sounds = load_cue_sounds(&settings.sound_dir).await;
    let mut saved = settings.clone();

    let mut current_viewport = viewport();
    let mut session = GameSession::new(settings, current_viewport, MacroquadAudio::new(sounds), StdRng::from_entropy());
    let mut surface = MacroquadSurface;

    loop {
        let now = viewport();
        if now != current_viewport {
            current_viewport = now;
            session.resize(now);
        }

        let pad = DirectionPad::visible(current_viewport).then(|| DirectionPad::layout(current_viewport));
        if poll_input(&mut session, pad.as_ref()) == Control::Quit {
            break;
        }

        session.advance(Duration::from_secs_f32(get_frame_time()));

        session.render(&mut surface);
        if let Some(pad) = &pad {
            pad.draw(&mut surface);
        }
        draw_hud(&mut surface, &session);

        if session.settings() != &saved {
            saved = session.settings().clone();
            if let Err(err) = saved.save(SETTINGS_PATH) {
                warn!("settings not saved: {}", err);
            }
        }

        next_frame().await;
    }

    info!("quitting");
}
