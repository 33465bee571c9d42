//! TabletConfig - Active Driver Configuration
//!
//! The configuration the driver applies to pen input: the mapping between
//! tablet and screen areas, the transform matrix, and the three tablet
//! button bindings. This is the document the editor round-trips.

use serde::{Deserialize, Serialize};

use crate::domain::Area;

/// Driver configuration as carried by `GetConfig` / `UpdateConfig`
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct TabletConfig {
    /// Move the cursor while the pen hovers above the surface
    pub hover_enabled: bool,
    /// Bindings for the three tablet buttons
    pub buttons: [ButtonBinding; 3],
    /// Active area in tablet coordinates
    pub mapping: Area,
    /// Target area in screen coordinates
    pub screen: Area,
    /// Row-major 2x2 transform applied after mapping
    pub matrix: (f32, f32, f32, f32),
}

impl Default for TabletConfig {
    fn default() -> Self {
        Self {
            hover_enabled: true,
            buttons: Default::default(),
            mapping: Area::default(),
            screen: Area::default(),
            matrix: (1.0, 0.0, 0.0, 1.0),
        }
    }
}

/// What a tablet button does when pressed
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum ButtonMode {
    Mouse,
    Keyboard,
    Disabled,
}

/// A single tablet button binding.
///
/// `button` is set for [`ButtonMode::Mouse`], `keys` for
/// [`ButtonMode::Keyboard`]; both stay absent for a disabled button.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ButtonBinding {
    pub mode: ButtonMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<String>>,
}

impl Default for ButtonMode {
    fn default() -> Self {
        ButtonMode::Disabled
    }
}

impl ButtonBinding {
    /// Bind to a mouse button
    pub fn mouse(button: u8) -> Self {
        Self {
            mode: ButtonMode::Mouse,
            button: Some(button),
            keys: None,
        }
    }

    /// Bind to a key chord
    pub fn keyboard(keys: Vec<String>) -> Self {
        Self {
            mode: ButtonMode::Keyboard,
            button: None,
            keys: Some(keys),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "hover_enabled": true,
            "buttons": [
                { "mode": "Mouse", "button": 1 },
                { "mode": "Keyboard", "keys": ["Control", "z"] },
                { "mode": "Disabled" }
            ],
            "mapping": { "x": 0, "y": 0, "width": 15200, "height": 9500 },
            "screen": { "x": 0, "y": 0, "width": 1920, "height": 1080 },
            "matrix": [1.0, 0.0, 0.0, 1.0]
        }"#
    }

    #[test]
    fn test_config_deserializes_from_driver_payload() {
        let config: TabletConfig = serde_json::from_str(sample_json()).expect("parse");

        assert!(config.hover_enabled);
        assert_eq!(config.buttons[0], ButtonBinding::mouse(1));
        assert_eq!(
            config.buttons[1],
            ButtonBinding::keyboard(vec!["Control".into(), "z".into()])
        );
        assert_eq!(config.buttons[2].mode, ButtonMode::Disabled);
        assert_eq!(config.mapping.width, 15200);
        assert_eq!(config.matrix, (1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_disabled_binding_serializes_without_optionals() {
        let raw = serde_json::to_value(ButtonBinding::default()).expect("serialize");
        assert_eq!(raw, serde_json::json!({ "mode": "Disabled" }));
    }

    #[test]
    fn test_config_roundtrip() {
        let config: TabletConfig = serde_json::from_str(sample_json()).expect("parse");
        let raw = serde_json::to_string(&config).expect("serialize");
        let back: TabletConfig = serde_json::from_str(&raw).expect("reparse");
        assert_eq!(config, back);
    }
}
