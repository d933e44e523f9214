//! Discrete input events

/// Commands delivered by the input boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    MoveLeft,
    MoveRight,
    Fire,
    Pause,
    Quit,
    Restart,
    ToggleFullscreen,
    ZoomIn,
    ZoomOut,
}

impl InputEvent {
    /// Map a key name to a command using the classic layout
    /// (arrows or A/D to steer, Space to fire, Enter to restart).
    pub fn from_key(key: &str) -> Option<Self> {
        let event = match key {
            "ArrowLeft" | "a" | "A" => InputEvent::MoveLeft,
            "ArrowRight" | "d" | "D" => InputEvent::MoveRight,
            " " | "Space" => InputEvent::Fire,
            "p" | "P" => InputEvent::Pause,
            "Escape" => InputEvent::Quit,
            "Enter" => InputEvent::Restart,
            "F11" => InputEvent::ToggleFullscreen,
            "+" | "=" => InputEvent::ZoomIn,
            "-" | "_" => InputEvent::ZoomOut,
            _ => return None,
        };
        Some(event)
    }
}

/// An input event stamped with the time it arrived (seconds)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedInput {
    pub event: InputEvent,
    pub time: f64,
}

impl TimedInput {
    pub fn new(event: InputEvent, time: f64) -> Self {
        Self { event, time }
    }
}
