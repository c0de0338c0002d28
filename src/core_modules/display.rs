// The display-transform configuration is an opaque pass-through value owned
// by the embedding layer; the pipeline embeds whatever it is given without
// validation. This module only supplies the stock pose set used when the
// embedder does not provide one.

use serde_json::{Value, json};

/// The default display transforms: a hand-tuned pose per context so the flat
/// card reads well held, dropped, and in inventory.
pub fn default_display_settings() -> Value {
    json!({
        "thirdperson_righthand": {
            "rotation": [0, -90, 55],
            "translation": [0, 4, 0.5],
            "scale": [0.85, 0.85, 0.85]
        },
        "thirdperson_lefthand": {
            "rotation": [0, 90, -55],
            "translation": [0, 4, 0.5],
            "scale": [0.85, 0.85, 0.85]
        },
        "firstperson_righthand": {
            "rotation": [0, -90, 25],
            "translation": [1.13, 3.2, 1.13],
            "scale": [0.68, 0.68, 0.68]
        },
        "firstperson_lefthand": {
            "rotation": [0, 90, -25],
            "translation": [1.13, 3.2, 1.13],
            "scale": [0.68, 0.68, 0.68]
        },
        "ground": {
            "translation": [0, 3, 0],
            "scale": [0.5, 0.5, 0.5]
        },
        "gui": {
            "scale": [1, 1, 1]
        },
        "head": {
            "translation": [0, 14.5, 0],
            "scale": [1.6, 1.6, 1.6]
        },
        "fixed": {
            "rotation": [0, 180, 0],
            "scale": [1, 1, 1]
        }
    })
}
