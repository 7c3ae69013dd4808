//! Input state management

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use warden_core::{Result, Vec2, WardenError};
use winit::keyboard::KeyCode;

/// Lookup of registered action names, consulted when validating bindings
pub trait ActionRegistry {
    fn has_action(&self, action: &str) -> bool;
}

/// A physical trigger an action can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    Key(KeyCode),
    /// Mouse button index (0 = left, 1 = right, 2 = middle)
    Mouse(u32),
}

/// Whether the host should show the pointer or hide and lock it to the window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CursorMode {
    #[default]
    Visible,
    Captured,
}

/// Tracks keyboard and mouse input state per frame
pub struct InputState {
    /// Keys currently held down
    keys_down: HashSet<KeyCode>,
    /// Keys pressed this frame
    keys_just_pressed: HashSet<KeyCode>,
    /// Keys released this frame
    keys_just_released: HashSet<KeyCode>,

    /// Mouse buttons currently held
    mouse_buttons_down: HashSet<u32>,
    /// Mouse buttons pressed this frame
    mouse_buttons_just_pressed: HashSet<u32>,

    /// Raw accumulated mouse delta (device motion, independent of cursor position)
    raw_mouse_delta: (f64, f64),

    /// Requested pointer mode, applied to the window by the host
    cursor_mode: CursorMode,

    /// Action map: action name -> bound keys and mouse buttons
    action_map: HashMap<String, Vec<Binding>>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            keys_just_pressed: HashSet::new(),
            keys_just_released: HashSet::new(),
            mouse_buttons_down: HashSet::new(),
            mouse_buttons_just_pressed: HashSet::new(),
            raw_mouse_delta: (0.0, 0.0),
            cursor_mode: CursorMode::Visible,
            action_map: Self::default_action_map(),
        }
    }

    fn default_action_map() -> HashMap<String, Vec<Binding>> {
        use Binding::Key;

        let mut map = HashMap::new();
        map.insert(
            "ui_left".into(),
            vec![Key(KeyCode::ArrowLeft), Key(KeyCode::KeyA)],
        );
        map.insert(
            "ui_right".into(),
            vec![Key(KeyCode::ArrowRight), Key(KeyCode::KeyD)],
        );
        map.insert(
            "ui_up".into(),
            vec![Key(KeyCode::ArrowUp), Key(KeyCode::KeyW)],
        );
        map.insert(
            "ui_down".into(),
            vec![Key(KeyCode::ArrowDown), Key(KeyCode::KeyS)],
        );
        map.insert(
            "ui_accept".into(),
            vec![Key(KeyCode::Space), Key(KeyCode::Enter)],
        );
        map.insert("ui_cancel".into(), vec![Key(KeyCode::Escape)]);
        map
    }

    /// Bind an action to one or more triggers, replacing any previous binding
    pub fn bind_action(&mut self, action: impl Into<String>, bindings: Vec<Binding>) {
        self.action_map.insert(action.into(), bindings);
    }

    /// Remove an action from the map entirely
    pub fn unbind_action(&mut self, action: &str) -> bool {
        self.action_map.remove(action).is_some()
    }

    /// Process a key press event
    pub fn process_key_down(&mut self, key: KeyCode) {
        if !self.keys_down.contains(&key) {
            self.keys_just_pressed.insert(key);
        }
        self.keys_down.insert(key);
    }

    /// Process a key release event
    pub fn process_key_up(&mut self, key: KeyCode) {
        self.keys_down.remove(&key);
        self.keys_just_released.insert(key);
    }

    /// Process mouse button press
    pub fn process_mouse_button_down(&mut self, button: u32) {
        if !self.mouse_buttons_down.contains(&button) {
            self.mouse_buttons_just_pressed.insert(button);
        }
        self.mouse_buttons_down.insert(button);
    }

    /// Process mouse button release
    pub fn process_mouse_button_up(&mut self, button: u32) {
        self.mouse_buttons_down.remove(&button);
    }

    /// Process raw mouse delta (device motion, for locked cursor)
    pub fn process_mouse_raw_delta(&mut self, dx: f64, dy: f64) {
        self.raw_mouse_delta.0 += dx;
        self.raw_mouse_delta.1 += dy;
    }

    /// Call at end of frame to clear per-frame state
    pub fn end_frame(&mut self) {
        self.keys_just_pressed.clear();
        self.keys_just_released.clear();
        self.mouse_buttons_just_pressed.clear();
        self.raw_mouse_delta = (0.0, 0.0);
    }

    pub fn set_cursor_mode(&mut self, mode: CursorMode) {
        self.cursor_mode = mode;
    }

    pub fn cursor_mode(&self) -> CursorMode {
        self.cursor_mode
    }

    // --- Query methods ---

    /// Is a key currently held down?
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Was a key pressed this frame?
    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.keys_just_pressed.contains(&key)
    }

    /// Was a key released this frame?
    pub fn is_key_just_released(&self, key: KeyCode) -> bool {
        self.keys_just_released.contains(&key)
    }

    /// Is a mouse button currently held?
    pub fn is_mouse_button_down(&self, button: u32) -> bool {
        self.mouse_buttons_down.contains(&button)
    }

    /// Was a mouse button pressed this frame?
    pub fn is_mouse_button_just_pressed(&self, button: u32) -> bool {
        self.mouse_buttons_just_pressed.contains(&button)
    }

    fn binding_down(&self, binding: &Binding) -> bool {
        match binding {
            Binding::Key(key) => self.keys_down.contains(key),
            Binding::Mouse(button) => self.mouse_buttons_down.contains(button),
        }
    }

    fn binding_just_pressed(&self, binding: &Binding) -> bool {
        match binding {
            Binding::Key(key) => self.keys_just_pressed.contains(key),
            Binding::Mouse(button) => self.mouse_buttons_just_pressed.contains(button),
        }
    }

    /// Is an action currently held? (any bound key or mouse button is down)
    pub fn is_action_pressed(&self, action: &str) -> bool {
        self.action_map
            .get(action)
            .map(|bindings| bindings.iter().any(|b| self.binding_down(b)))
            .unwrap_or(false)
    }

    /// Was an action just pressed this frame?
    pub fn is_action_just_pressed(&self, action: &str) -> bool {
        self.action_map
            .get(action)
            .map(|bindings| bindings.iter().any(|b| self.binding_just_pressed(b)))
            .unwrap_or(false)
    }

    /// 0.0 or 1.0 depending on whether the action is held
    fn action_strength(&self, action: &str) -> f32 {
        if self.is_action_pressed(action) {
            1.0
        } else {
            0.0
        }
    }

    /// Combine four actions into a direction vector with length at most 1.
    ///
    /// Opposing actions cancel out; diagonals are scaled back to unit length.
    pub fn get_vector(
        &self,
        negative_x: &str,
        positive_x: &str,
        negative_y: &str,
        positive_y: &str,
    ) -> Vec2 {
        Vec2::new(
            self.action_strength(positive_x) - self.action_strength(negative_x),
            self.action_strength(positive_y) - self.action_strength(negative_y),
        )
        .limit_length()
    }

    /// Get the raw mouse delta (accumulated device motion)
    pub fn raw_mouse_delta(&self) -> (f64, f64) {
        self.raw_mouse_delta
    }
}

impl ActionRegistry for InputState {
    fn has_action(&self, action: &str) -> bool {
        self.action_map.contains_key(action)
    }
}

/// Action bindings loaded from the `[actions]` table of an input config file.
///
/// ```toml
/// [actions]
/// sprint = ["ShiftLeft"]
/// freefly = ["KeyF"]
/// fire = ["Mouse0"]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputConfig {
    #[serde(default)]
    pub actions: BTreeMap<String, Vec<String>>,
}

impl InputConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Register every configured action on `input`, replacing defaults of the same name
    pub fn apply(&self, input: &mut InputState) -> Result<()> {
        for (action, names) in &self.actions {
            let bindings = names
                .iter()
                .map(|name| parse_binding(name))
                .collect::<Result<Vec<_>>>()?;
            input.bind_action(action.clone(), bindings);
        }
        Ok(())
    }
}

/// Parse a binding name such as `KeyW`, `ArrowUp`, `Space` or `Mouse0`
pub fn parse_binding(name: &str) -> Result<Binding> {
    if let Some(index) = name.strip_prefix("Mouse") {
        return index
            .parse::<u32>()
            .map(Binding::Mouse)
            .map_err(|_| WardenError::UnknownBinding(name.to_string()));
    }

    let key = match name {
        "KeyA" => KeyCode::KeyA,
        "KeyB" => KeyCode::KeyB,
        "KeyC" => KeyCode::KeyC,
        "KeyD" => KeyCode::KeyD,
        "KeyE" => KeyCode::KeyE,
        "KeyF" => KeyCode::KeyF,
        "KeyG" => KeyCode::KeyG,
        "KeyH" => KeyCode::KeyH,
        "KeyI" => KeyCode::KeyI,
        "KeyJ" => KeyCode::KeyJ,
        "KeyK" => KeyCode::KeyK,
        "KeyL" => KeyCode::KeyL,
        "KeyM" => KeyCode::KeyM,
        "KeyN" => KeyCode::KeyN,
        "KeyO" => KeyCode::KeyO,
        "KeyP" => KeyCode::KeyP,
        "KeyQ" => KeyCode::KeyQ,
        "KeyR" => KeyCode::KeyR,
        "KeyS" => KeyCode::KeyS,
        "KeyT" => KeyCode::KeyT,
        "KeyU" => KeyCode::KeyU,
        "KeyV" => KeyCode::KeyV,
        "KeyW" => KeyCode::KeyW,
        "KeyX" => KeyCode::KeyX,
        "KeyY" => KeyCode::KeyY,
        "KeyZ" => KeyCode::KeyZ,
        "Digit0" => KeyCode::Digit0,
        "Digit1" => KeyCode::Digit1,
        "Digit2" => KeyCode::Digit2,
        "Digit3" => KeyCode::Digit3,
        "Digit4" => KeyCode::Digit4,
        "Digit5" => KeyCode::Digit5,
        "Digit6" => KeyCode::Digit6,
        "Digit7" => KeyCode::Digit7,
        "Digit8" => KeyCode::Digit8,
        "Digit9" => KeyCode::Digit9,
        "ArrowUp" => KeyCode::ArrowUp,
        "ArrowDown" => KeyCode::ArrowDown,
        "ArrowLeft" => KeyCode::ArrowLeft,
        "ArrowRight" => KeyCode::ArrowRight,
        "Space" => KeyCode::Space,
        "Enter" => KeyCode::Enter,
        "Escape" => KeyCode::Escape,
        "Tab" => KeyCode::Tab,
        "Backspace" => KeyCode::Backspace,
        "ShiftLeft" => KeyCode::ShiftLeft,
        "ShiftRight" => KeyCode::ShiftRight,
        "ControlLeft" => KeyCode::ControlLeft,
        "ControlRight" => KeyCode::ControlRight,
        "AltLeft" => KeyCode::AltLeft,
        "AltRight" => KeyCode::AltRight,
        "F1" => KeyCode::F1,
        "F2" => KeyCode::F2,
        "F3" => KeyCode::F3,
        "F4" => KeyCode::F4,
        "F5" => KeyCode::F5,
        "F6" => KeyCode::F6,
        "F7" => KeyCode::F7,
        "F8" => KeyCode::F8,
        "F9" => KeyCode::F9,
        "F10" => KeyCode::F10,
        "F11" => KeyCode::F11,
        "F12" => KeyCode::F12,
        _ => return Err(WardenError::UnknownBinding(name.to_string())),
    };
    Ok(Binding::Key(key))
}
