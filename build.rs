// build.rs

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

/// Languages compiled into the `t!` macro, in the order of the `Language` enum.
const LANGUAGES: &[(&str, &str)] = &[("fr", "Fr"), ("en", "En")];

/// The catalog every other language falls back to for missing keys.
const FALLBACK_LANG: &str = "en";

fn load_catalog(lang: &str) -> BTreeMap<String, String> {
    let path = format!("locales/{}.toml", lang);
    let content =
        fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to read language file: {}", path));
    toml::from_str(&content).unwrap_or_else(|e| panic!("Failed to parse {}: {}", path, e))
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn main() {
    // --- 1. Rerun triggers ---
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=locales/");

    // --- 2. Load the fallback catalog, then every language on top of it ---
    let fallback = load_catalog(FALLBACK_LANG);
    let mut catalogs: Vec<(&str, BTreeMap<String, String>)> = Vec::new();
    for (code, variant) in LANGUAGES {
        let mut merged = fallback.clone();
        if *code != FALLBACK_LANG {
            let specific = load_catalog(code);
            for key in specific.keys() {
                if !fallback.contains_key(key) {
                    println!(
                        "cargo:warning=Key '{}' in locales/{}.toml has no '{}' counterpart.",
                        key, code, FALLBACK_LANG
                    );
                }
            }
            for key in fallback.keys() {
                if !specific.contains_key(key) {
                    println!(
                        "cargo:warning=Key '{}' is missing from locales/{}.toml. Falling back to '{}'.",
                        key, code, FALLBACK_LANG
                    );
                }
            }
            merged.extend(specific);
        }
        catalogs.push((variant, merged));
    }

    // --- 3. Generate the `t!` macro: one arm per key, dispatching on a runtime `Language` ---
    let mut macro_code = String::from(
        "/// Looks up a message key in the compiled catalogs: `t!(\"error.label\", lang)`.\n#[macro_export]\nmacro_rules! t {\n",
    );
    for key in fallback.keys() {
        macro_code.push_str(&format!("    (\"{}\", $lang:expr) => {{\n", key));
        macro_code.push_str("        match $lang {\n");
        for (variant, catalog) in &catalogs {
            let value = catalog.get(key).map(String::as_str).unwrap_or_default();
            macro_code.push_str(&format!(
                "            $crate::models::Language::{} => \"{}\",\n",
                variant,
                escape(value)
            ));
        }
        macro_code.push_str("        }\n    };\n");
    }
    // Compile-time error branch for missing keys.
    macro_code.push_str(
        "    ($key:expr, $lang:expr) => {{ compile_error!(concat!(\"Missing translation key: \", $key)) }};\n",
    );
    macro_code.push('}');

    // --- 4. Write the generated code to `OUT_DIR` ---
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let dest_path = Path::new(&out_dir).join("translations.rs");
    fs::write(&dest_path, macro_code).expect("Failed to write translations.rs");
}
