// Copyright 2026 the Terrane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON snapshots of the ordering table.
//!
//! [`layers_to_json`] serializes a
//! [`FrameLayers`](terrane_core::layers::FrameLayers) table as
//! strata → levels → frames, in render order, skipping empty strata.
//! [`write_layers`] pretty-prints the same snapshot to a writer.

use std::io::{self, Write};

use serde_json::{Value, json};

use terrane_core::layers::FrameLayers;
use terrane_core::strata::FrameStrata;

/// Serializes the table as JSON, strata and levels in render order.
///
/// Empty strata are omitted, so an empty table serializes as
/// `{"strata": []}`.
#[must_use]
pub fn layers_to_json(layers: &FrameLayers) -> Value {
    let mut strata: Vec<Value> = Vec::new();

    for s in FrameStrata::STORABLE {
        let levels: Vec<Value> = layers
            .range_for(s)
            .map(|(level, frames)| {
                json!({
                    "level": level,
                    "frames": frames.map(|id| id.0).collect::<Vec<u64>>(),
                })
            })
            .collect();
        if levels.is_empty() {
            continue;
        }
        strata.push(json!({
            "strata": format!("{s:?}"),
            "levels": levels,
        }));
    }

    json!({ "strata": strata })
}

/// Writes the table snapshot as pretty-printed JSON.
pub fn write_layers(layers: &FrameLayers, writer: &mut dyn Write) -> io::Result<()> {
    let value = layers_to_json(layers);
    serde_json::to_writer_pretty(&mut *writer, &value)?;
    writeln!(writer)
}

#[cfg(test)]
mod tests {
    use terrane_core::FrameId;
    use terrane_core::strata::FrameStrata::{Medium, Tooltip};

    use super::*;

    #[test]
    fn empty_table_serializes_to_empty_strata() {
        let layers = FrameLayers::new();
        assert_eq!(layers_to_json(&layers), json!({ "strata": [] }));
    }

    #[test]
    fn snapshot_reflects_render_order() {
        let mut layers = FrameLayers::new();
        layers.register(FrameId(1), Medium, 0);
        layers.register(FrameId(2), Medium, -3);
        layers.register(FrameId(3), Medium, 0);
        layers.register(FrameId(4), Tooltip, 1);

        let value = layers_to_json(&layers);
        assert_eq!(
            value,
            json!({
                "strata": [
                    {
                        "strata": "Medium",
                        "levels": [
                            { "level": -3, "frames": [2] },
                            { "level": 0, "frames": [1, 3] },
                        ],
                    },
                    {
                        "strata": "Tooltip",
                        "levels": [
                            { "level": 1, "frames": [4] },
                        ],
                    },
                ],
            })
        );
    }

    #[test]
    fn write_layers_emits_valid_json() {
        let mut layers = FrameLayers::new();
        layers.register(FrameId(9), Medium, 2);

        let mut out = Vec::new();
        write_layers(&layers, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, layers_to_json(&layers));
    }
}
