use crate::config::PIXELS_PER_SCROLL_LINE;
use crate::controller::Action;
use crate::state::State;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

/// Key bindings. Each key maps to exactly one action.
pub fn key_action(key: KeyCode) -> Option<Action> {
    let action = match key {
        KeyCode::KeyZ => Action::ToggleUi,
        KeyCode::KeyX => Action::ToggleDarkMode,
        KeyCode::KeyC => Action::ToggleRainbow,
        KeyCode::KeyV => Action::ToggleDecoy,
        KeyCode::Space => Action::TogglePause,
        KeyCode::KeyR => Action::ResetPattern,
        KeyCode::Digit1 => Action::Spawn(0),
        KeyCode::Digit2 => Action::Spawn(1),
        KeyCode::Digit3 => Action::Spawn(2),
        KeyCode::Digit4 => Action::Spawn(3),
        KeyCode::Digit5 => Action::Spawn(4),
        KeyCode::ArrowRight => Action::CycleRule(1),
        KeyCode::ArrowLeft => Action::CycleRule(-1),
        KeyCode::ArrowUp => Action::SpeedUp,
        KeyCode::ArrowDown => Action::SlowDown,
        KeyCode::KeyN => Action::CycleNeighborhood(1),
        _ => return None,
    };
    Some(action)
}

/// Wheel delta in lines. Trackpad pixel deltas are damped so one swipe
/// does not run through every zoom level.
pub fn scroll_amount(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(pos) => (pos.y / PIXELS_PER_SCROLL_LINE) as f32,
    }
}

/// A right-button release ends the pan.
pub fn releases_pan(button: MouseButton, element_state: ElementState) -> bool {
    button == MouseButton::Right && element_state == ElementState::Released
}

/// Events handled even when the overlay consumed them: resizes, and pan
/// releases so a drag dropped over the overlay does not stick.
pub fn bypasses_overlay(event: &WindowEvent) -> bool {
    match event {
        WindowEvent::Resized(_) => true,
        WindowEvent::MouseInput { button, state, .. } => releases_pan(*button, *state),
        _ => false,
    }
}

/// Scroll up zooms in, scroll down zooms out.
pub fn scroll_action(delta: f32) -> Option<Action> {
    if delta > 0.0 {
        Some(Action::ZoomIn)
    } else if delta < 0.0 {
        Some(Action::ZoomOut)
    } else {
        None
    }
}

/// Window pointer position (y down) in y-up host coordinates.
pub fn host_pointer(position: PhysicalPosition<f64>) -> [f32; 2] {
    [position.x as f32, -(position.y as f32)]
}

pub fn handle_keyboard(state: &mut State, event: &KeyEvent) {
    if event.state != ElementState::Pressed || event.repeat {
        return;
    }
    if let PhysicalKey::Code(code) = event.physical_key {
        if let Some(action) = key_action(code) {
            state.apply(action);
        }
    }
}

pub fn handle_zoom(state: &mut State, delta: f32) {
    if let Some(action) = scroll_action(delta) {
        state.apply(action);
        log::debug!("Zoom: {}x", state.controller.view.scale());
    }
}

pub fn handle_mouse_input(state: &mut State, button: MouseButton, element_state: ElementState) {
    if button != MouseButton::Right {
        return;
    }
    let is_pressed = element_state == ElementState::Pressed;
    if is_pressed && !state.is_right_mouse_pressed {
        if let Some(pos) = state.cursor_pos {
            state.apply(Action::BeginPan { pointer: host_pointer(pos) });
        }
    }
    state.is_right_mouse_pressed = is_pressed;
}

pub fn handle_cursor_move(state: &mut State, position: PhysicalPosition<f64>) {
    state.cursor_pos = Some(position);
    if state.is_right_mouse_pressed {
        state.apply(Action::ContinuePan { pointer: host_pointer(position) });
    }
}

pub fn handle_cursor_left(state: &mut State) {
    // Keep the drag alive so it resumes if the cursor re-enters with the button held.
    state.cursor_pos = None;
}
