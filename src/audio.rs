//! Audio system
//!
//! Procedurally generated sound effects: every sound is a short chord of sine
//! tones, so no asset files are needed. The simulation never calls into
//! audio; the game driver maps [`GameEvent`]s to cues with [`sound_cues`].

use crate::sim::{GameEvent, Modifier};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Wing flap
    Flap,
    /// Pipe passed
    Point,
    /// Fatal hit
    Collision,
    /// Generic pickup chime
    PowerUp,
    SpeedBoost,
    ButtonClick,
    /// Rising arpeggio for big moments
    LevelUp,
    GameOver,
    Coin,
    Shield,
    Combo,
    Magnet,
    SlowMotion,
}

/// One sine partial of a sound
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Hz
    pub freq: f32,
    /// Seconds
    pub duration: f32,
    /// Relative to the sfx gain
    pub volume: f32,
}

const fn tone(freq: f32, duration: f32, volume: f32) -> Tone {
    Tone {
        freq,
        duration,
        volume,
    }
}

impl SoundEffect {
    /// Partials played together for this sound
    pub fn tones(self) -> &'static [Tone] {
        match self {
            SoundEffect::Flap => const { &[tone(523.0, 0.08, 0.4), tone(659.0, 0.06, 0.3)] },
            SoundEffect::Point => const {
                &[
                    tone(900.0, 0.05, 0.5),
                    tone(1100.0, 0.08, 0.4),
                    tone(1300.0, 0.05, 0.3),
                ]
            },
            SoundEffect::Collision => const {
                &[
                    tone(200.0, 0.1, 0.6),
                    tone(150.0, 0.15, 0.5),
                    tone(100.0, 0.2, 0.4),
                ]
            },
            SoundEffect::PowerUp => const {
                &[
                    tone(1100.0, 0.08, 0.5),
                    tone(1400.0, 0.08, 0.5),
                    tone(1700.0, 0.1, 0.5),
                ]
            },
            SoundEffect::SpeedBoost => const {
                &[
                    tone(800.0, 0.05, 0.5),
                    tone(1200.0, 0.08, 0.6),
                    tone(1600.0, 0.1, 0.5),
                ]
            },
            SoundEffect::ButtonClick => const { &[tone(700.0, 0.05, 0.4), tone(900.0, 0.05, 0.3)] },
            SoundEffect::LevelUp => const {
                &[
                    tone(523.0, 0.1, 0.5),
                    tone(659.0, 0.1, 0.5),
                    tone(784.0, 0.1, 0.5),
                    tone(1047.0, 0.15, 0.6),
                ]
            },
            SoundEffect::GameOver => const {
                &[
                    tone(400.0, 0.15, 0.6),
                    tone(320.0, 0.15, 0.6),
                    tone(240.0, 0.2, 0.5),
                ]
            },
            SoundEffect::Coin => const { &[tone(1400.0, 0.05, 0.5), tone(1700.0, 0.08, 0.5)] },
            SoundEffect::Shield => const {
                &[
                    tone(659.0, 0.08, 0.5),
                    tone(784.0, 0.08, 0.5),
                    tone(987.0, 0.1, 0.5),
                ]
            },
            SoundEffect::Combo => const { &[tone(1100.0, 0.06, 0.4), tone(1400.0, 0.06, 0.4)] },
            SoundEffect::Magnet => const { &[tone(1200.0, 0.1, 0.4), tone(1800.0, 0.1, 0.5)] },
            SoundEffect::SlowMotion => const { &[tone(400.0, 0.1, 0.4), tone(200.0, 0.15, 0.5)] },
        }
    }
}

/// Sounds to play for a simulation event, in order
pub fn sound_cues(event: &GameEvent) -> &'static [SoundEffect] {
    use SoundEffect as S;
    match event {
        GameEvent::SessionStarted | GameEvent::Paused | GameEvent::Resumed => &[S::ButtonClick],
        GameEvent::Flapped => &[S::Flap],
        GameEvent::PointScored { .. } => &[S::Point],
        GameEvent::ComboMilestone { .. } => &[S::LevelUp, S::Combo],
        GameEvent::Collision => &[S::Collision],
        GameEvent::ShieldAbsorbed => &[S::Shield],
        GameEvent::GhostPhased { .. } => &[],
        GameEvent::CoinCollected { .. } => &[S::Coin],
        GameEvent::PowerUpCollected(modifier) => match modifier {
            Modifier::Shield => &[S::Shield, S::PowerUp],
            Modifier::SlowMotion => &[S::SlowMotion, S::PowerUp],
            Modifier::Magnet => &[S::Magnet, S::PowerUp],
            Modifier::DoublePoints => &[S::LevelUp, S::PowerUp],
            Modifier::Ghost => &[S::PowerUp],
            Modifier::SpeedBoost => &[S::SpeedBoost, S::PowerUp],
        },
        GameEvent::SessionEnded(_) => &[S::GameOver],
    }
}

/// Somewhere sounds go. Playback failures stay inside the sink.
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Sink with no device: logs and drops
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, effect: SoundEffect) {
        log::debug!("sound: {effect:?}");
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, SoundEffect, Tone};
    use crate::settings::Settings;

    /// Web Audio sink
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        master_volume: f32,
        sfx_volume: f32,
        muted: bool,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            let defaults = Settings::default();
            Self {
                ctx,
                master_volume: defaults.master_volume,
                sfx_volume: defaults.sfx_volume,
                muted: false,
            }
        }

        pub fn apply_settings(&mut self, settings: &Settings) {
            self.master_volume = settings.master_volume;
            self.sfx_volume = settings.sfx_volume;
            self.muted = !settings.sound_enabled;
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        fn effective_volume(&self) -> f32 {
            if self.muted {
                0.0
            } else {
                self.master_volume * self.sfx_volume
            }
        }

        fn create_osc(&self, ctx: &AudioContext, freq: f32) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(OscillatorType::Sine);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Decaying sine blip
        fn play_tone(&self, ctx: &AudioContext, tone: &Tone, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, tone.freq) else {
                return;
            };
            let t = ctx.current_time();
            let end = t + f64::from(tone.duration);

            gain.gain().set_value_at_time(tone.volume * vol, t).ok();
            gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(end).ok();
        }
    }

    impl AudioSink for AudioManager {
        fn play(&mut self, effect: SoundEffect) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Browsers start the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            for tone in effect.tones() {
                self.play_tone(ctx, tone, vol);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Character, Difficulty, SessionSummary};

    #[test]
    fn test_every_pickup_plays_generic_chime() {
        for modifier in Modifier::ALL {
            let cues = sound_cues(&GameEvent::PowerUpCollected(modifier));
            assert_eq!(cues.last(), Some(&SoundEffect::PowerUp), "{modifier:?}");
        }
        assert_eq!(
            sound_cues(&GameEvent::CoinCollected { amount: 10 }),
            &[SoundEffect::Coin]
        );
    }

    #[test]
    fn test_activation_cues() {
        let first = |m| sound_cues(&GameEvent::PowerUpCollected(m))[0];
        assert_eq!(first(Modifier::Shield), SoundEffect::Shield);
        assert_eq!(first(Modifier::DoublePoints), SoundEffect::LevelUp);
        assert_eq!(first(Modifier::SpeedBoost), SoundEffect::SpeedBoost);
    }

    #[test]
    fn test_lifecycle_cues() {
        assert_eq!(
            sound_cues(&GameEvent::ComboMilestone { streak: 5 }),
            &[SoundEffect::LevelUp, SoundEffect::Combo]
        );
        let summary = SessionSummary {
            score: 3,
            coins: 0,
            best_streak: 3,
            frames: 400,
            previous_high_score: 0,
            new_high_score: true,
            difficulty: Difficulty::Easy,
            character: Character::Classic,
            demo: false,
        };
        assert_eq!(
            sound_cues(&GameEvent::SessionEnded(summary)),
            &[SoundEffect::GameOver]
        );
        assert!(sound_cues(&GameEvent::GhostPhased { uses_left: 1 }).is_empty());
    }

    #[test]
    fn test_every_sound_has_static_tones() {
        use SoundEffect as S;
        let all = [
            S::Flap,
            S::Point,
            S::Collision,
            S::PowerUp,
            S::SpeedBoost,
            S::ButtonClick,
            S::LevelUp,
            S::GameOver,
            S::Coin,
            S::Shield,
            S::Combo,
            S::Magnet,
            S::SlowMotion,
        ];
        let tables: Vec<&'static [Tone]> = all.iter().map(|s| s.tones()).collect();
        for (effect, tones) in all.iter().zip(&tables) {
            assert!((2..=4).contains(&tones.len()), "{effect:?}");
            assert!(tones.iter().all(|t| t.freq > 0.0), "{effect:?}");
        }
    }

    #[test]
    fn test_tone_tables() {
        let flap = SoundEffect::Flap.tones();
        assert_eq!(flap.len(), 2);
        assert_eq!(flap[0], tone(523.0, 0.08, 0.4));
        assert_eq!(SoundEffect::LevelUp.tones().len(), 4);
        assert!(
            SoundEffect::GameOver
                .tones()
                .iter()
                .all(|t| t.volume > 0.0 && t.duration > 0.0)
        );
    }
}
