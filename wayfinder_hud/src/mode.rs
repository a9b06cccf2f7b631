// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input mode derivation from HUD region visibility.

/// How the owning controller routes input.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum InputMode {
    /// Input goes to the game; the cursor is hidden.
    #[default]
    Game,
    /// Input goes to the game and the UI.
    GameAndUi,
    /// Input goes to the UI only.
    Ui,
}

/// The four signals the mode is derived from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct InputModeInputs {
    /// A menu is open on the player-screen HUD.
    pub screen_menu_visible: bool,
    /// A menu is open on the viewport HUD.
    pub viewport_menu_visible: bool,
    /// A menu is open on the possessed pawn's HUD.
    pub pawn_menu_visible: bool,
    /// The pawn wants the cursor pinned to the screen center.
    pub pawn_wants_centered_cursor: bool,
}

impl Default for InputModeInputs {
    fn default() -> Self {
        Self {
            screen_menu_visible: false,
            viewport_menu_visible: false,
            pawn_menu_visible: false,
            pawn_wants_centered_cursor: true,
        }
    }
}

/// Result of [`derive_input_mode`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ModeDecision {
    /// The input mode to activate.
    pub mode: InputMode,
    /// Whether the cursor is frozen to the screen center.
    pub freeze_cursor: bool,
}

/// Derive the input mode and cursor freeze from the region signals.
///
/// Screen or viewport menus force [`InputMode::Ui`], pawn menus force
/// [`InputMode::GameAndUi`]; both release the cursor. With no menu open the mode is
/// [`InputMode::Game`] and the cursor follows the pawn's preference.
///
/// ```
/// use wayfinder_hud::{derive_input_mode, InputMode, InputModeInputs};
///
/// let idle = derive_input_mode(InputModeInputs::default());
/// assert_eq!(idle.mode, InputMode::Game);
/// assert!(idle.freeze_cursor);
/// ```
pub fn derive_input_mode(inputs: InputModeInputs) -> ModeDecision {
    if inputs.screen_menu_visible || inputs.viewport_menu_visible {
        ModeDecision {
            mode: InputMode::Ui,
            freeze_cursor: false,
        }
    } else if inputs.pawn_menu_visible {
        ModeDecision {
            mode: InputMode::GameAndUi,
            freeze_cursor: false,
        }
    } else {
        ModeDecision {
            mode: InputMode::Game,
            freeze_cursor: inputs.pawn_wants_centered_cursor,
        }
    }
}

/// Keeps the region signals and reports decisions only when they change.
#[derive(Clone, Debug, Default)]
pub struct InputModeCoordinator {
    inputs: InputModeInputs,
    applied: Option<ModeDecision>,
}

impl InputModeCoordinator {
    /// A coordinator with nothing open and a pawn that wants a centered cursor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current signals.
    pub fn inputs(&self) -> InputModeInputs {
        self.inputs
    }

    /// The last decision handed out, if any.
    pub fn current(&self) -> Option<ModeDecision> {
        self.applied
    }

    /// Replace all signals and re-evaluate.
    pub fn update(&mut self, inputs: InputModeInputs) -> Option<ModeDecision> {
        self.inputs = inputs;
        self.evaluate()
    }

    /// Set the three region signals and re-evaluate.
    pub fn set_regions(&mut self, screen: bool, viewport: bool, pawn: bool) -> Option<ModeDecision> {
        self.inputs.screen_menu_visible = screen;
        self.inputs.viewport_menu_visible = viewport;
        self.inputs.pawn_menu_visible = pawn;
        self.evaluate()
    }

    /// Set the pawn's cursor preference and re-evaluate.
    pub fn set_pawn_wants_centered_cursor(&mut self, wants: bool) -> Option<ModeDecision> {
        self.inputs.pawn_wants_centered_cursor = wants;
        self.evaluate()
    }

    /// Re-derive the decision. Returns it only when it differs from the last one handed out.
    pub fn evaluate(&mut self) -> Option<ModeDecision> {
        let decision = derive_input_mode(self.inputs);
        if self.applied == Some(decision) {
            return None;
        }
        log::debug!(
            "input mode {:?}, cursor frozen: {}",
            decision.mode,
            decision.freeze_cursor
        );
        self.applied = Some(decision);
        Some(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(screen: bool, viewport: bool, pawn: bool, centered: bool) -> InputModeInputs {
        InputModeInputs {
            screen_menu_visible: screen,
            viewport_menu_visible: viewport,
            pawn_menu_visible: pawn,
            pawn_wants_centered_cursor: centered,
        }
    }

    #[test]
    fn nothing_open_follows_pawn_preference() {
        let d = derive_input_mode(inputs(false, false, false, true));
        assert_eq!(d, ModeDecision { mode: InputMode::Game, freeze_cursor: true });
        let d = derive_input_mode(inputs(false, false, false, false));
        assert_eq!(d, ModeDecision { mode: InputMode::Game, freeze_cursor: false });
    }

    #[test]
    fn screen_menu_wins_over_everything() {
        for viewport in [false, true] {
            for pawn in [false, true] {
                for centered in [false, true] {
                    let d = derive_input_mode(inputs(true, viewport, pawn, centered));
                    assert_eq!(
                        d,
                        ModeDecision { mode: InputMode::Ui, freeze_cursor: false },
                        "viewport={viewport} pawn={pawn} centered={centered}"
                    );
                }
            }
        }
    }

    #[test]
    fn viewport_menu_means_ui() {
        let d = derive_input_mode(inputs(false, true, true, true));
        assert_eq!(d, ModeDecision { mode: InputMode::Ui, freeze_cursor: false });
    }

    #[test]
    fn pawn_menu_means_game_and_ui() {
        for centered in [false, true] {
            let d = derive_input_mode(inputs(false, false, true, centered));
            assert_eq!(d, ModeDecision { mode: InputMode::GameAndUi, freeze_cursor: false });
        }
    }

    #[test]
    fn coordinator_reports_changes_once() {
        let mut c = InputModeCoordinator::new();
        let first = c.evaluate();
        assert_eq!(first, Some(ModeDecision { mode: InputMode::Game, freeze_cursor: true }));
        assert_eq!(c.evaluate(), None, "unchanged result is side-effect free");

        let ui = c.set_regions(true, false, false);
        assert_eq!(ui.map(|d| d.mode), Some(InputMode::Ui));
        assert_eq!(c.set_regions(true, false, true), None, "still Ui");
        assert_eq!(
            c.set_pawn_wants_centered_cursor(false),
            None,
            "preference is ignored while a menu is open"
        );

        let game = c.set_regions(false, false, false);
        assert_eq!(game, Some(ModeDecision { mode: InputMode::Game, freeze_cursor: false }));
        assert_eq!(c.current(), game);
    }
}
