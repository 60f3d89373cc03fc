//! Build script for solstice-host
//!
//! Validates face.toml at compile time. The file is embedded into the
//! simulator, so a broken default should fail the build, not the first run.

use std::fs;
use std::path::Path;

/// Longest data path the protocol can carry
const MAX_PATH_LEN: usize = 32;
/// Longest payload key the protocol can carry
const MAX_KEY_LEN: usize = 16;
/// Longest node id
const MAX_NODE_LEN: usize = 32;
/// Largest icon the atlas draws
const MAX_ICON_SIZE: i64 = 256;

fn main() {
    println!("cargo:rerun-if-changed=face.toml");
    println!("cargo:rerun-if-changed=build.rs");

    let config_path = Path::new("face.toml");

    if !config_path.exists() {
        fail(
            "face.toml not found",
            &["The simulator embeds face.toml from the solstice-host directory.".into()],
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read face.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in face.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    validate_required_sections(&config);
    validate_face(&config);
    validate_simulation(&config);

    println!("cargo:warning=face.toml validated successfully");
}

/// Abort the build with a boxed error listing
fn fail(title: &str, errors: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        errors
            .iter()
            .map(|e| format!("║  • {:<62} ║", truncate(e)))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

fn truncate(line: &str) -> String {
    if line.chars().count() > 62 {
        format!("{}...", line.chars().take(59).collect::<String>())
    } else {
        line.to_string()
    }
}

fn validate_required_sections(config: &toml::Value) {
    let mut errors = Vec::new();

    if !matches!(config.get("face"), Some(toml::Value::Table(_))) {
        errors.push("Missing [face] section".to_string());
    }
    if !matches!(config.get("simulation"), Some(toml::Value::Table(_))) {
        errors.push("Missing [simulation] section".to_string());
    }

    if !errors.is_empty() {
        fail("Missing required sections in face.toml", &errors);
    }
}

fn check_color(errors: &mut Vec<String>, name: &str, value: &toml::Value) {
    match value.as_integer() {
        Some(c) if (0..=0xFF_FFFF).contains(&c) => {}
        _ => errors.push(format!("[face] {} must be a color 0x000000-0xFFFFFF", name)),
    }
}

fn validate_face(config: &toml::Value) {
    let Some(face) = config.get("face").and_then(|f| f.as_table()) else {
        return;
    };
    let mut errors = Vec::new();

    for name in ["background", "text_color"] {
        if let Some(value) = face.get(name) {
            check_color(&mut errors, name, value);
        }
    }

    if let Some(palette) = face.get("tap_palette") {
        match palette.as_array() {
            Some(colors) if colors.len() == 2 => {
                for (i, c) in colors.iter().enumerate() {
                    check_color(&mut errors, &format!("tap_palette[{}]", i), c);
                }
            }
            _ => errors.push("[face] tap_palette must list exactly 2 colors".into()),
        }
    }

    if let Some(period) = face.get("tick_period_ms") {
        if !matches!(period.as_integer(), Some(p) if p > 0) {
            errors.push("[face] tick_period_ms must be greater than 0".into());
        }
    }

    if let Some(size) = face.get("icon_size") {
        if !matches!(size.as_integer(), Some(s) if (1..=MAX_ICON_SIZE).contains(&s)) {
            errors.push(format!("[face] icon_size must be 1-{}", MAX_ICON_SIZE));
        }
    }

    if let Some(sync) = face.get("sync").and_then(|s| s.as_table()) {
        if let Some(path) = sync.get("path") {
            match path.as_str() {
                Some(p) if p.starts_with('/') && p.len() <= MAX_PATH_LEN => {}
                _ => errors.push(format!(
                    "[face.sync] path must start with '/' (max {} chars)",
                    MAX_PATH_LEN
                )),
            }
        }

        if let Some(keys) = sync.get("keys").and_then(|k| k.as_table()) {
            for (name, key) in keys {
                match key.as_str() {
                    Some(k) if !k.is_empty() && k.len() <= MAX_KEY_LEN => {}
                    _ => errors.push(format!(
                        "[face.sync.keys] {} must be 1-{} chars",
                        name, MAX_KEY_LEN
                    )),
                }
            }
        }
    }

    if !errors.is_empty() {
        fail("Invalid face configuration", &errors);
    }
}

fn validate_simulation(config: &toml::Value) {
    let Some(sim) = config.get("simulation").and_then(|s| s.as_table()) else {
        return;
    };
    let mut errors = Vec::new();

    for name in ["canvas_width", "canvas_height", "publish_interval_s", "time_tick_s"] {
        if let Some(value) = sim.get(name) {
            if !matches!(value.as_integer(), Some(v) if v > 0) {
                errors.push(format!("[simulation] {} must be greater than 0", name));
            }
        }
    }

    if let Some(node) = sim.get("node_id") {
        if !matches!(node.as_str(), Some(n) if n.len() <= MAX_NODE_LEN) {
            errors.push(format!(
                "[simulation] node_id must be at most {} chars",
                MAX_NODE_LEN
            ));
        }
    }

    if let Some(forecasts) = sim.get("forecasts") {
        match forecasts.as_array() {
            Some(list) => {
                for (i, forecast) in list.iter().enumerate() {
                    let Some(forecast) = forecast.as_table() else {
                        errors.push(format!("[[simulation.forecasts]] {} must be a table", i));
                        continue;
                    };

                    if !matches!(forecast.get("condition_id"), Some(toml::Value::Integer(_))) {
                        errors.push(format!("forecast {} missing integer 'condition_id'", i));
                    }
                    for field in ["high", "low"] {
                        if !matches!(forecast.get(field), Some(toml::Value::String(_))) {
                            errors.push(format!("forecast {} missing string '{}'", i, field));
                        }
                    }
                }
            }
            None => errors.push("[simulation] forecasts must be an array of tables".into()),
        }
    }

    if !errors.is_empty() {
        fail("Invalid simulation configuration", &errors);
    }
}
