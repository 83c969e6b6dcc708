use touchcloud_engine::geometry::DrawStyle;
use touchcloud_engine::input::Key;
use touchcloud_engine::scene::SceneInput;

/// Slider positions between 0 and 1; one arrow press or wheel line moves one.
pub const SLIDER_TICKS: i32 = 20;

/// What the sketch should do after a control input.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ControlAction {
    None,
    Exit,
}

/// Keyboard stand-in for the style picker, speed slider and reset button.
///
/// - `1`/`2`/`3`: Point / Line / Cube
/// - `R`, `Backspace`: reset
/// - `Up`/`Down`, mouse wheel: spin speed slider
/// - `Escape`: quit
#[derive(Debug, Default)]
pub struct Controls {
    ticks: i32,
    /// Fractional wheel lines not yet applied.
    wheel_carry: f32,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slider value in `[0, 1]`.
    #[inline]
    pub fn slider(&self) -> f32 {
        self.ticks as f32 / SLIDER_TICKS as f32
    }

    /// Handles a key press. `repeat` presses only move the slider.
    pub fn on_key(&mut self, key: Key, repeat: bool, input: &mut impl SceneInput) -> ControlAction {
        match key {
            Key::ArrowUp => self.nudge_slider(1, input),
            Key::ArrowDown => self.nudge_slider(-1, input),
            _ if repeat => {}

            Key::Digit1 | Key::Digit2 | Key::Digit3 => {
                if let Some(style) = style_for_key(key) {
                    input.set_style(style);
                }
            }
            Key::R | Key::Backspace => input.reset(),
            Key::Escape => return ControlAction::Exit,
            _ => {}
        }
        ControlAction::None
    }

    /// Handles vertical wheel motion, in lines.
    pub fn on_wheel(&mut self, lines: f32, input: &mut impl SceneInput) {
        if !lines.is_finite() {
            return;
        }
        self.wheel_carry += lines;
        let whole = self.wheel_carry.trunc();
        self.wheel_carry -= whole;
        if whole != 0.0 {
            let steps = whole.clamp(-SLIDER_TICKS as f32, SLIDER_TICKS as f32) as i32;
            self.nudge_slider(steps, input);
        }
    }

    fn nudge_slider(&mut self, steps: i32, input: &mut impl SceneInput) {
        let ticks = self.ticks.saturating_add(steps).clamp(0, SLIDER_TICKS);
        if ticks == self.ticks {
            return;
        }
        self.ticks = ticks;
        let value = self.slider();
        log::debug!("spin slider {value:.2}");
        input.set_spin_speed(value);
    }
}

fn style_for_key(key: Key) -> Option<DrawStyle> {
    let index = match key {
        Key::Digit1 => 0,
        Key::Digit2 => 1,
        Key::Digit3 => 2,
        _ => return None,
    };
    DrawStyle::from_index(index)
}
