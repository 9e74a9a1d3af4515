use std::fs;

const FORMATTING_KEYS: [&str; 5] = [
    "enhance_typography",
    "highlight_merge_fields",
    "improve_spacing",
    "add_accessibility_tags",
    "mobile_optimized",
];
const CONTENT_TYPES: [&str; 4] = ["email", "lesson", "article", "general"];

fn main() {
    let config_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={}", config_path);

    let content = fs::read_to_string(config_path).expect("Failed to read default_config.toml");
    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {}", e),
    };

    // The bundled defaults must spell out every pass toggle.
    let formatting = table
        .get("formatting")
        .and_then(|v| v.as_table())
        .expect("default_config.toml needs a [formatting] table");
    for key in FORMATTING_KEYS {
        match formatting.get(key) {
            Some(toml::Value::Boolean(_)) => {}
            _ => panic!("default_config.toml: formatting.{} must be a boolean", key),
        }
    }

    let template = table
        .get("template")
        .and_then(|v| v.as_table())
        .expect("default_config.toml needs a [template] table");
    match template.get("content_type").and_then(|v| v.as_str()) {
        Some(kind) if CONTENT_TYPES.contains(&kind) => {}
        other => panic!("default_config.toml: unknown content_type {:?}", other),
    }
    match template.get("words_per_minute").and_then(|v| v.as_integer()) {
        Some(wpm) if wpm > 0 => {}
        other => panic!("default_config.toml: words_per_minute must be positive, got {:?}", other),
    }
    match template.get("long_template_words").and_then(|v| v.as_integer()) {
        Some(words) if words >= 0 => {}
        other => panic!("default_config.toml: long_template_words must be a count, got {:?}", other),
    }
    if !matches!(template.get("show_merge_field_types"), Some(toml::Value::Boolean(_))) {
        panic!("default_config.toml: show_merge_field_types must be a boolean");
    }
}
