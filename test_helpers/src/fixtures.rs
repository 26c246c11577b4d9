//! JSON documents describing configuration trees used across test suites.
//!
//! Callers convert them with `ConfigNode::from_json`. Objects become nodes,
//! arrays repeat their key, and scalars are written as strings where the
//! original configuration would carry free text.

use serde_json::{Value, json};

/// A complete body entry with properties, an atmosphere and terrain mods.
#[must_use]
pub fn kerbin() -> Value {
    json!({
        "name": "Kerbin",
        "Properties": {
            "radius": "600000",
            "mass": "5.2915158e22",
            "description": "Home planet",
            "color": "RGBA(37, 90, 180, 255)",
        },
        "Atmosphere": {
            "enabled": "true",
            "maxAltitude": "70000",
            "pressureCurve": {
                "key": ["0 101.325", "35000 0.5", "70000 0"],
            },
        },
        "Mods": {
            "VertexHeightNoise": { "deformity": "200", "frequency": "4" },
            "VertexSimplexHeight": { "name": "Mountains", "deformity": "3500" },
            "LandControl": { "name": "Biomes" },
        },
    })
}

/// A patch for [`kerbin`] that names the body and touches a few members.
#[must_use]
pub fn kerbin_patch() -> Value {
    json!({
        "name": "Kerbin",
        "Atmosphere": { "maxAltitude": "84000" },
        "Mods": {
            "VertexSimplexHeight": { "name": "Mountains", "deformity": "4200" },
            "VertexHeightNoise": { "frequency": "6" },
        },
    })
}

/// A root holding several body entries, one of them invalid.
#[must_use]
pub fn system() -> Value {
    json!({
        "Body": [
            { "name": "Kerbin", "Properties": { "radius": "600000" } },
            { "Properties": { "radius": "200000" } },
            { "name": "Mun", "Properties": { "radius": "oops" } },
            { "name": "Minmus", "Properties": { "radius": "60000" } },
        ],
    })
}
