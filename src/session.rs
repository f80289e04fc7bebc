//! Game session
//!
//! Owns one [`GameState`] and drives it frame by frame: fixed-timestep
//! ticks, the starfield timer, and the fade-out that plays when a session
//! ends. The front end replaces the whole session when [`Session::frame`]
//! returns [`SessionSignal::Restart`].

use crate::consts::*;
use crate::platform::Controls;
use crate::renderer::scene::{self, Overlay};
use crate::renderer::vertex::Vertex;
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, TickOutcome, tick};

/// What the front end should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSignal {
    /// Keep this session
    Continue,
    /// Drop this session and start a new one
    Restart,
}

/// Fade-out played after game over or level complete
///
/// The overlay is re-blended once per step, so its opacity compounds: step
/// `i` blends black at alpha `i * FADE_ALPHA_STEP / 255` over the previous
/// result.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub phase: GamePhase,
    pub elapsed_ms: f32,
    step_ms: f32,
    hold_ms: f32,
}

impl Transition {
    /// Number of overlay steps (alphas 0, 10, ... 250)
    pub const STEPS: u32 = FADE_ALPHA_MAX.div_ceil(FADE_ALPHA_STEP);

    pub fn new(phase: GamePhase, step_ms: f32, hold_ms: f32) -> Self {
        debug_assert!(phase.is_terminal(), "transition from {phase:?}");
        Self {
            phase,
            elapsed_ms: 0.0,
            step_ms,
            hold_ms,
        }
    }

    /// Overlay steps blended so far, at least one
    pub fn steps_shown(&self) -> u32 {
        if self.step_ms <= 0.0 {
            return Self::STEPS;
        }
        ((self.elapsed_ms / self.step_ms) as u32 + 1).min(Self::STEPS)
    }

    /// Opacity of the black overlay after compounding every step shown
    pub fn overlay_alpha(&self) -> f32 {
        let clear: f32 = (0..self.steps_shown())
            .map(|i| 1.0 - (i * FADE_ALPHA_STEP) as f32 / 255.0)
            .product();
        1.0 - clear
    }

    pub fn duration_ms(&self) -> f32 {
        Self::STEPS as f32 * self.step_ms + self.hold_ms
    }

    pub fn finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms()
    }

    pub fn message(&self) -> &'static str {
        match self.phase {
            GamePhase::LevelComplete => "LEVEL 0 COMPLETE",
            _ => "GAME OVER",
        }
    }
}

pub struct Session {
    state: GameState,
    settings: Settings,
    /// Unsimulated time in seconds
    accumulator: f32,
    transition: Option<Transition>,
}

impl Session {
    /// Start a fresh session
    pub fn new(seed: u64, settings: &Settings) -> Self {
        log::info!("New game with seed: {}", seed);
        Self {
            state: GameState::new(seed, &settings.tuning),
            settings: settings.clone(),
            accumulator: 0.0,
            transition: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    /// Target frame rate for the current phase
    pub fn fps(&self) -> u32 {
        match self.state.phase {
            GamePhase::Paused => self.settings.paused_fps,
            _ => self.settings.running_fps,
        }
    }

    /// Advance by one rendered frame of `dt_ms` milliseconds
    pub fn frame(&mut self, dt_ms: f32, controls: &mut Controls) -> SessionSignal {
        if controls.take_new_game() {
            log::info!("New game requested");
            return SessionSignal::Restart;
        }

        if let Some(transition) = &mut self.transition {
            // Nothing else is honored until the fade finishes
            let _ = controls.take_tick_input();
            transition.elapsed_ms += dt_ms;
            if transition.finished() {
                log::info!("Session over ({:?})", transition.phase);
                return SessionSignal::Restart;
            }
            return SessionSignal::Continue;
        }

        let dt = (dt_ms / 1000.0).min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = controls.take_tick_input();
            let before = self.state.phase;
            let outcome = tick(&mut self.state, &input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            if self.state.phase != before {
                log::info!("Phase {:?} -> {:?}", before, self.state.phase);
            }

            match outcome {
                TickOutcome::Continue => {}
                TickOutcome::GameOver | TickOutcome::LevelComplete => {
                    self.transition = Some(Transition::new(
                        self.state.phase,
                        self.settings.fade_step_ms,
                        self.settings.hold_ms,
                    ));
                    self.accumulator = 0.0;
                    break;
                }
            }

            if self.state.phase == GamePhase::Paused {
                self.accumulator = 0.0;
                break;
            }
        }

        if self.state.phase == GamePhase::Running {
            self.state.advance_starfield(dt_ms);
        }

        SessionSignal::Continue
    }

    /// Overlay for the current phase
    pub fn overlay(&self) -> Overlay {
        match (&self.transition, self.state.phase) {
            (Some(t), _) => Overlay::Fade {
                alpha: t.overlay_alpha(),
                message: t.message(),
            },
            (None, GamePhase::Paused) => Overlay::Paused,
            _ => Overlay::None,
        }
    }

    /// Everything to draw this frame, in arena coordinates
    pub fn draw_list(&self) -> Vec<Vertex> {
        scene::build(&self.state, self.overlay(), self.settings.starfield)
    }
}
