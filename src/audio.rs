//! Audio cues and playback
//!
//! [`plan`] decides what a simulation event should sound like given the
//! music/sound switches. Playback lives in the wasm-only [`AudioManager`]:
//! sound effects are synthesized with the Web Audio API, background tracks
//! stream from `audio/*.mp3`. Every playback failure is swallowed.

use crate::sim::{AudioToggles, GameEvent, MusicTrack};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player flapped
    Flap,
    /// Player hit a pillar or left the playfield
    Crash,
    /// New session best on game over
    HighScore,
}

/// What the audio backend should do for one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioAction {
    Effect(SoundEffect),
    /// Switch background track; `None` stops all music
    Music(Option<MusicTrack>),
}

/// Map a simulation event to an audio action
pub fn plan(event: GameEvent, toggles: AudioToggles) -> Option<AudioAction> {
    match event {
        GameEvent::Flap if toggles.sound => Some(AudioAction::Effect(SoundEffect::Flap)),
        GameEvent::Crash if toggles.sound => Some(AudioAction::Effect(SoundEffect::Crash)),
        GameEvent::Flap | GameEvent::Crash => None,
        // Switching tracks always stops the old one, even when muted
        GameEvent::Music(track) => Some(AudioAction::Music(track.filter(|_| toggles.music))),
    }
}

impl MusicTrack {
    /// Asset path relative to the page
    pub fn src(self) -> &'static str {
        match self {
            MusicTrack::Intro => "audio/intro.mp3",
            MusicTrack::Game => "audio/game.mp3",
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

    use super::{AudioAction, SoundEffect, plan};
    use crate::settings::Settings;
    use crate::sim::{AudioToggles, GameEvent, MusicTrack};

    /// Looping background track
    struct Track {
        kind: MusicTrack,
        element: HtmlAudioElement,
    }

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        tracks: Vec<Track>,
        sfx_volume: f32,
        music_volume: f32,
        /// Track requested while the page was still locked
        pending: Option<MusicTrack>,
        unlocked: bool,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - sound effects disabled");
            }

            let tracks = [MusicTrack::Intro, MusicTrack::Game]
                .into_iter()
                .filter_map(|kind| match HtmlAudioElement::new_with_src(kind.src()) {
                    Ok(element) => {
                        element.set_loop(true);
                        element.set_volume(settings.effective_music_volume() as f64);
                        Some(Track { kind, element })
                    }
                    Err(e) => {
                        log::warn!("Failed to load {}: {:?}", kind.src(), e);
                        None
                    }
                })
                .collect();

            Self {
                ctx,
                tracks,
                sfx_volume: settings.effective_sfx_volume(),
                music_volume: settings.effective_music_volume(),
                pending: None,
                unlocked: false,
            }
        }

        /// Resume audio after the first user gesture (browser autoplay policy)
        pub fn unlock(&mut self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
            if !self.unlocked {
                self.unlocked = true;
                if let Some(track) = self.pending.take() {
                    self.play_music(Some(track));
                }
            }
        }

        /// React to a simulation event
        pub fn handle(&mut self, event: GameEvent, toggles: AudioToggles) {
            match plan(event, toggles) {
                Some(AudioAction::Effect(effect)) => self.play(effect),
                Some(AudioAction::Music(track)) => self.play_music(track),
                None => {}
            }
        }

        /// Stop everything but `track`, then start it from the beginning
        pub fn play_music(&mut self, track: Option<MusicTrack>) {
            for t in &self.tracks {
                let _ = t.element.pause();
                t.element.set_current_time(0.0);
            }

            if !self.unlocked {
                self.pending = track;
                return;
            }

            let Some(kind) = track else { return };
            if let Some(t) = self.tracks.iter().find(|t| t.kind == kind) {
                t.element.set_volume(self.music_volume as f64);
                if let Ok(promise) = t.element.play() {
                    // Swallow autoplay rejections
                    wasm_bindgen_futures::spawn_local(async move {
                        if let Err(e) = JsFuture::from(promise).await {
                            log::debug!("Music playback rejected: {:?}", e);
                        }
                    });
                }
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.sfx_volume;
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Flap => self.play_flap(ctx, vol),
                SoundEffect::Crash => self.play_crash(ctx, vol),
                SoundEffect::HighScore => self.play_high_score(ctx, vol),
            }
        }

        // === Sound generators ===

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Flap - short upward wing swish
        fn play_flap(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 250.0, OscillatorType::Triangle) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.25, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.frequency().set_value_at_time(250.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(700.0, t + 0.1)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }

        /// Crash - thud followed by a sad descending line
        fn play_crash(&self, ctx: &AudioContext, vol: f32) {
            if let Some((osc, gain)) = self.create_osc(ctx, 120.0, OscillatorType::Sine) {
                let t = ctx.current_time();
                gain.gain().set_value_at_time(vol * 0.6, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                    .ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(40.0, t + 0.2)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.25).ok();
            }

            for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
                let delay = 0.2 + i as f64 * 0.2;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.3, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.4).ok();
                }
            }
        }

        /// High score - celebratory
        fn play_high_score(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [500.0, 600.0, 700.0, 800.0, 1000.0].iter().enumerate() {
                let delay = 1.0 + i as f64 * 0.08;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.25, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.3).ok();
                }
            }
        }
    }
}
