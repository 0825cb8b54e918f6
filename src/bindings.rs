//! # Host Input Bindings
//!
//! Translates what the host sees (key presses, pointer and visibility signals) into
//! [`SliderCommand`]s. The controller itself never listens to anything; this is the layer
//! that decides which slider reacts to which input.

use crate::SliderCommand;
use serde::{Deserialize, Serialize};

/// Keys the site reacts to, named after DOM `KeyboardEvent.key` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Space,
    Escape,
    Other,
}

impl Key {
    /// Parse a DOM key name. Unknown names map to [`Key::Other`].
    pub fn from_dom(name: &str) -> Self {
        match name {
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            " " | "Space" | "Spacebar" => Key::Space,
            "Escape" | "Esc" => Key::Escape,
            _ => Key::Other,
        }
    }
}

/// When a slider listens to the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum KeyboardScope {
    /// Always, wherever focus is on the page
    #[default]
    Global,
    /// Only while the slider is fully inside the viewport
    WhenVisible,
    /// Never
    Disabled,
}

/// Key map for one slider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyBindings {
    pub scope: KeyboardScope,
    /// Whether Space toggles autoplay
    pub space_toggles: bool,
}

impl KeyBindings {
    /// Hero slider: arrows navigate, Space toggles autoplay, anywhere on the page.
    pub fn hero() -> Self {
        Self {
            scope: KeyboardScope::Global,
            space_toggles: true,
        }
    }

    /// Testimonials: arrows only, and only while the slider is on screen.
    pub fn testimonials() -> Self {
        Self {
            scope: KeyboardScope::WhenVisible,
            space_toggles: false,
        }
    }

    pub fn new(scope: KeyboardScope, space_toggles: bool) -> Self {
        Self {
            scope,
            space_toggles,
        }
    }

    /// Command for `key`, or `None` when this slider ignores it.
    ///
    /// `in_viewport` only matters for [`KeyboardScope::WhenVisible`].
    pub fn resolve(&self, key: Key, in_viewport: bool) -> Option<SliderCommand> {
        match self.scope {
            KeyboardScope::Disabled => return None,
            KeyboardScope::WhenVisible if !in_viewport => return None,
            _ => {}
        }

        match key {
            Key::ArrowLeft => Some(SliderCommand::Previous),
            Key::ArrowRight => Some(SliderCommand::Next),
            Key::Space if self.space_toggles => Some(SliderCommand::TogglePlayback),
            _ => None,
        }
    }

    /// Whether the host should suppress the browser default for `key` (page scroll on Space).
    pub fn prevents_default(&self, key: Key) -> bool {
        key == Key::Space && self.space_toggles && self.scope != KeyboardScope::Disabled
    }
}

/// Environment signals a host may forward to a slider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostSignal {
    PointerEnter,
    PointerLeave,
    PageHidden,
    PageVisible,
}

impl HostSignal {
    /// Transient interruptions suspend; their end resumes. Neither touches the autoplay flag.
    pub fn command(self) -> SliderCommand {
        match self {
            HostSignal::PointerEnter | HostSignal::PageHidden => SliderCommand::Suspend,
            HostSignal::PointerLeave | HostSignal::PageVisible => SliderCommand::Resume,
        }
    }
}
