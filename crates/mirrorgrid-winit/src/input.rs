//! Translates winit input events into mirrorgrid [`Msg`] values.
//!
//! Pointer positions are produced in window pixels; the caller makes them
//! canvas-relative with [`Range::rel_msg`](mirrorgrid_core::Range::rel_msg).

use std::time::Instant;

use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::{Key as WKey, ModifiersState, NamedKey};

use mirrorgrid_core::{Key, ModMask, MouseAction, Msg, Point};

// ---------------------------------------------------------------------------
// Keyboard
// ---------------------------------------------------------------------------

pub(crate) fn translate_modifiers(state: ModifiersState) -> ModMask {
    let mut mask = ModMask::NONE;
    if state.shift_key() {
        mask = mask | ModMask::SHIFT;
    }
    if state.control_key() {
        mask = mask | ModMask::CTRL;
    }
    if state.alt_key() {
        mask = mask | ModMask::ALT;
    }
    if state.super_key() {
        mask = mask | ModMask::META;
    }
    mask
}

pub(crate) fn translate_keyboard(event: &KeyEvent, modifiers: ModMask) -> Option<Msg> {
    // Only key-down (pressed) events.
    if event.state != ElementState::Pressed {
        return None;
    }

    let key = match &event.logical_key {
        WKey::Named(named) => match named {
            NamedKey::ArrowLeft => Key::ArrowLeft,
            NamedKey::ArrowRight => Key::ArrowRight,
            NamedKey::Escape => Key::Escape,
            NamedKey::Enter => Key::Enter,
            NamedKey::Tab => Key::Tab,
            NamedKey::Space => Key::Space,
            NamedKey::Backspace => Key::Backspace,
            NamedKey::Delete => Key::Delete,
            NamedKey::Home => Key::Home,
            NamedKey::End => Key::End,
            _ => return None,
        },
        WKey::Character(s) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                // With Ctrl held some platforms report control characters;
                // bindings are matched on the lowercase letter.
                (Some(c), None) if modifiers.contains(ModMask::CTRL) => {
                    Key::Char(c.to_ascii_lowercase())
                }
                (Some(c), None) => Key::Char(c),
                _ => return None,
            }
        }
        _ => return None,
    };

    Some(Msg::KeyDown {
        key,
        modifiers,
        time: Instant::now(),
    })
}

// ---------------------------------------------------------------------------
// Pointer
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn window_point(position: PhysicalPosition<f64>) -> Point {
    Point::new(position.x.floor() as i32, position.y.floor() as i32)
}

pub(crate) fn translate_mouse_button(
    btn_state: ElementState,
    button: MouseButton,
    cursor: Point,
    modifiers: ModMask,
) -> Option<Msg> {
    let action = match btn_state {
        ElementState::Pressed => match button {
            MouseButton::Left => MouseAction::Main,
            MouseButton::Right => MouseAction::Secondary,
            _ => return None,
        },
        ElementState::Released => match button {
            MouseButton::Left => MouseAction::Release,
            _ => return None,
        },
    };

    Some(Msg::Mouse {
        action,
        pos: cursor,
        modifiers,
        time: Instant::now(),
    })
}

pub(crate) fn translate_cursor_moved(cursor: Point, modifiers: ModMask) -> Msg {
    Msg::Mouse {
        action: MouseAction::Move,
        pos: cursor,
        modifiers,
        time: Instant::now(),
    }
}
