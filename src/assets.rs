//! Loads the cue sounds, falling back to synthesised tones.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use log::{info, warn};
use macroquad::audio::{Sound, load_sound, load_sound_from_bytes};

use crate::audio::{Cue, fallback_tones, generate_wav};

const FALLBACK_LOUDNESS: f32 = 0.6;

async fn load_from_dir(dir: &Path, cue: Cue) -> Result<Sound> {
    let path = dir.join(cue.file_name());
    let path = path.to_str().context("sound path is not valid UTF-8")?;
    load_sound(path)
        .await
        .map_err(|err| anyhow!("failed to load {}: {}", path, err))
}

async fn synthesise(cue: Cue) -> Result<Sound> {
    let bytes = generate_wav(fallback_tones(cue), FALLBACK_LOUDNESS);
    load_sound_from_bytes(&bytes)
        .await
        .map_err(|err| anyhow!("failed to decode generated {:?} tone: {}", cue, err))
}

/// One sound per cue. A cue whose file and fallback both fail is left out and
/// simply stays silent.
pub async fn load_cue_sounds(dir: impl AsRef<Path>) -> HashMap<Cue, Sound> {
    let dir = dir.as_ref();
    let mut pool = HashMap::new();
    for cue in Cue::ALL {
        let sound = match load_from_dir(dir, cue).await {
            Ok(sound) => Ok(sound),
            Err(err) => {
                info!("{:?} cue: {:#}, using generated tone", cue, err);
                synthesise(cue).await
            }
        };
        match sound {
            Ok(sound) => {
                let _ = pool.insert(cue, sound);
            }
            Err(err) => warn!("{:?} cue will be silent: {:#}", cue, err),
        }
    }
    pool
}
