// src/shortcuts.rs
use bitflags::bitflags;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;

use crate::config::ShortcutKeys;
use crate::error::{describe_js_error, GuiError};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const CTRL  = 0b0001;
        const SHIFT = 0b0010;
        const ALT   = 0b0100;
        const META  = 0b1000;
    }
}

impl Modifiers {
    pub fn of(event: &KeyboardEvent) -> Self {
        let mut modifiers = Modifiers::empty();
        modifiers.set(Modifiers::CTRL, event.ctrl_key());
        modifiers.set(Modifiers::SHIFT, event.shift_key());
        modifiers.set(Modifiers::ALT, event.alt_key());
        modifiers.set(Modifiers::META, event.meta_key());
        modifiers
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Run,
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Binding {
    modifiers: Modifiers,
    key: String,
    action: Action,
}

/// Key-combination table. Stateless routing only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutMap {
    bindings: Vec<Binding>,
}

impl ShortcutMap {
    pub fn new(keys: &ShortcutKeys) -> Self {
        ShortcutMap {
            bindings: vec![
                Binding {
                    modifiers: Modifiers::CTRL,
                    key: keys.run.to_lowercase(),
                    action: Action::Run,
                },
                Binding {
                    modifiers: Modifiers::CTRL,
                    key: keys.clear.to_lowercase(),
                    action: Action::Clear,
                },
            ],
        }
    }

    /// A binding matches when all of its modifiers are held; extra modifiers
    /// (Shift turning `r` into `R`) do not prevent the match.
    pub fn resolve(&self, held: Modifiers, key: &str) -> Option<Action> {
        let key = key.to_lowercase();
        self.bindings
            .iter()
            .find(|binding| held.contains(binding.modifiers) && binding.key == key)
            .map(|binding| binding.action)
    }
}

impl Default for ShortcutMap {
    fn default() -> Self {
        Self::new(&ShortcutKeys::default())
    }
}

/// Document-level `keydown` listener. Removed when dropped.
pub struct ShortcutListener {
    closure: Closure<dyn FnMut(KeyboardEvent)>,
}

impl ShortcutListener {
    pub fn install(map: ShortcutMap, mut dispatch: impl FnMut(Action) + 'static) -> Result<Self, GuiError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| GuiError::MissingElement("document".into()))?;

        let closure = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if let Some(action) = map.resolve(Modifiers::of(&event), &event.key()) {
                // Ctrl+R would reload the page, Ctrl+L would focus the address bar
                event.prevent_default();
                dispatch(action);
            }
        });

        document
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
            .map_err(|err| GuiError::WasmBindingError(describe_js_error(&err)))?;

        Ok(ShortcutListener { closure })
    }
}

impl Drop for ShortcutListener {
    fn drop(&mut self) {
        if let Some(document) = web_sys::window().and_then(|window| window.document()) {
            let _ = document
                .remove_event_listener_with_callback("keydown", self.closure.as_ref().unchecked_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_r_runs_and_ctrl_l_clears() {
        let map = ShortcutMap::default();
        assert_eq!(map.resolve(Modifiers::CTRL, "r"), Some(Action::Run));
        assert_eq!(map.resolve(Modifiers::CTRL, "l"), Some(Action::Clear));
    }

    #[test]
    fn plain_keys_pass_through() {
        let map = ShortcutMap::default();
        assert_eq!(map.resolve(Modifiers::empty(), "r"), None);
        assert_eq!(map.resolve(Modifiers::ALT, "l"), None);
        assert_eq!(map.resolve(Modifiers::CTRL, "s"), None);
    }

    #[test]
    fn shifted_key_still_matches() {
        let map = ShortcutMap::default();
        assert_eq!(map.resolve(Modifiers::CTRL | Modifiers::SHIFT, "R"), Some(Action::Run));
    }

    #[test]
    fn configured_keys_replace_defaults() {
        let map = ShortcutMap::new(&ShortcutKeys {
            run: "Enter".into(),
            clear: "k".into(),
        });
        assert_eq!(map.resolve(Modifiers::CTRL, "Enter"), Some(Action::Run));
        assert_eq!(map.resolve(Modifiers::CTRL, "k"), Some(Action::Clear));
        assert_eq!(map.resolve(Modifiers::CTRL, "r"), None);
    }
}
