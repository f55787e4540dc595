//! Cue playback gated by a mute flag and a master volume.

use std::collections::HashMap;

use log::debug;
use macroquad::audio::{self, PlaySoundParams, Sound};
use thiserror::Error;

/// Background loop volume as a fraction of the master volume.
pub const BACKGROUND_VOLUME_SCALE: f32 = 0.25;
pub const DEFAULT_VOLUME: f32 = 0.8;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    Eat,
    GameOver,
    /// Loaded but not triggered by default.
    Move,
    Background,
}

impl Cue {
    pub const ALL: [Cue; 4] = [Cue::Eat, Cue::GameOver, Cue::Move, Cue::Background];

    pub fn file_name(self) -> &'static str {
        match self {
            Cue::Eat => "eat.wav",
            Cue::GameOver => "gameover.wav",
            Cue::Move => "move.wav",
            Cue::Background => "bgloop.wav",
        }
    }
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no sound loaded for the {0:?} cue")]
    Missing(Cue),
    #[error("playback rejected by the audio backend: {0}")]
    Rejected(String),
}

/// Platform playback. Each `play` call must start an independent instance so
/// overlapping triggers do not cut each other off.
pub trait AudioBackend {
    fn play(&mut self, cue: Cue, volume: f32) -> Result<(), AudioError>;
    fn start_loop(&mut self, cue: Cue, volume: f32) -> Result<(), AudioError>;
    /// Stops every instance of `cue` and rewinds it.
    fn stop(&mut self, cue: Cue);
    fn set_volume(&mut self, cue: Cue, volume: f32);
}

/// Mute and volume policy in front of an [`AudioBackend`]. Backend errors are
/// logged and dropped; gameplay never sees them.
#[derive(Debug)]
pub struct AudioFeedback<B> {
    backend: B,
    muted: bool,
    volume: f32,
    background_playing: bool,
}

impl<B: AudioBackend> AudioFeedback<B> {
    pub fn new(backend: B, muted: bool, volume: f32) -> Self {
        Self { backend, muted, volume: volume.clamp(0.0, 1.0), background_playing: false }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn background_playing(&self) -> bool {
        self.background_playing
    }

    pub fn cue_volume(&self, cue: Cue) -> f32 {
        match cue {
            Cue::Background => self.volume * BACKGROUND_VOLUME_SCALE,
            _ => self.volume,
        }
    }

    pub fn play(&mut self, cue: Cue) {
        if self.muted {
            return;
        }
        if let Err(err) = self.backend.play(cue, self.cue_volume(cue)) {
            debug!("{:?} cue not played: {}", cue, err);
        }
    }

    /// Starts the background loop unless muted or already playing.
    pub fn start_background(&mut self) {
        if self.muted || self.background_playing {
            return;
        }
        match self.backend.start_loop(Cue::Background, self.cue_volume(Cue::Background)) {
            Ok(()) => self.background_playing = true,
            Err(err) => debug!("background loop not started: {}", err),
        }
    }

    pub fn stop_background(&mut self) {
        self.backend.stop(Cue::Background);
        self.background_playing = false;
    }

    /// Muting silences everything that is currently playing.
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            for cue in Cue::ALL {
                self.backend.stop(cue);
            }
            self.background_playing = false;
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        for cue in Cue::ALL {
            let v = self.cue_volume(cue);
            self.backend.set_volume(cue, v);
        }
    }
}

/// Macroquad playback over a pool of loaded sounds keyed by cue. Every
/// `play_sound` call yields its own playback, so effects overlap freely.
pub struct MacroquadAudio {
    pool: HashMap<Cue, Sound>,
}

impl MacroquadAudio {
    pub fn new(pool: HashMap<Cue, Sound>) -> Self {
        Self { pool }
    }

    fn sound(&self, cue: Cue) -> Result<&Sound, AudioError> {
        self.pool.get(&cue).ok_or(AudioError::Missing(cue))
    }
}

impl AudioBackend for MacroquadAudio {
    fn play(&mut self, cue: Cue, volume: f32) -> Result<(), AudioError> {
        audio::play_sound(self.sound(cue)?, PlaySoundParams { looped: false, volume });
        Ok(())
    }

    fn start_loop(&mut self, cue: Cue, volume: f32) -> Result<(), AudioError> {
        audio::play_sound(self.sound(cue)?, PlaySoundParams { looped: true, volume });
        Ok(())
    }

    fn stop(&mut self, cue: Cue) {
        if let Ok(sound) = self.sound(cue) {
            audio::stop_sound(sound);
        }
    }

    fn set_volume(&mut self, cue: Cue, volume: f32) {
        if let Ok(sound) = self.sound(cue) {
            audio::set_sound_volume(sound, volume);
        }
    }
}

const SAMPLE_RATE: u32 = 44100;

/// One note of a synthesised cue.
#[derive(Copy, Clone, Debug)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration_seconds: f32,
}

impl Tone {
    pub const fn new(frequency_hz: f32, duration_seconds: f32) -> Self {
        Self { frequency_hz, duration_seconds }
    }
}

/// Built-in fallback notes for each cue.
pub fn fallback_tones(cue: Cue) -> &'static [Tone] {
    const EAT: [Tone; 2] = [Tone::new(660.0, 0.04), Tone::new(880.0, 0.06)];
    const GAME_OVER: [Tone; 3] = [Tone::new(330.0, 0.12), Tone::new(220.0, 0.12), Tone::new(110.0, 0.25)];
    const MOVE: [Tone; 1] = [Tone::new(440.0, 0.03)];
    const BACKGROUND: [Tone; 4] = [
        Tone::new(110.0, 0.4),
        Tone::new(164.8, 0.4),
        Tone::new(130.8, 0.4),
        Tone::new(98.0, 0.4),
    ];
    match cue {
        Cue::Eat => &EAT,
        Cue::GameOver => &GAME_OVER,
        Cue::Move => &MOVE,
        Cue::Background => &BACKGROUND,
    }
}

/// PCM16 mono WAV of the given notes played back to back.
pub fn generate_wav(tones: &[Tone], volume: f32) -> Vec<u8> {
    let num_samples: u32 = tones
        .iter()
        .map(|t| (t.duration_seconds * SAMPLE_RATE as f32) as u32)
        .sum();

    let block_align: u16 = 2;
    let byte_rate: u32 = SAMPLE_RATE * block_align as u32;
    let data_size: u32 = num_samples * 2;
    let chunk_size: u32 = 36 + data_size;

    let mut data: Vec<u8> = Vec::with_capacity(data_size as usize + 44);
    data.extend_from_slice(b"RIFF");
    data.extend_from_slice(&chunk_size.to_le_bytes());
    data.extend_from_slice(b"WAVE");
    data.extend_from_slice(b"fmt ");
    data.extend_from_slice(&16u32.to_le_bytes()); // PCM chunk size
    data.extend_from_slice(&1u16.to_le_bytes()); // PCM format
    data.extend_from_slice(&1u16.to_le_bytes()); // channels
    data.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    data.extend_from_slice(&byte_rate.to_le_bytes());
    data.extend_from_slice(&block_align.to_le_bytes());
    data.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    data.extend_from_slice(b"data");
    data.extend_from_slice(&data_size.to_le_bytes());

    let amplitude = volume.clamp(0.0, 1.0) * 0.7;
    for tone in tones {
        let samples = (tone.duration_seconds * SAMPLE_RATE as f32) as u32;
        for n in 0..samples {
            let t = n as f32 / SAMPLE_RATE as f32;
            // short linear fade at both ends to avoid clicks between notes
            let fade = (n.min(samples - n) as f32 / 200.0).min(1.0);
            let s = amplitude * fade * (std::f32::consts::TAU * tone.frequency_hz * t).sin();
            data.extend_from_slice(&((s * i16::MAX as f32) as i16).to_le_bytes());
        }
    }
    data
}
