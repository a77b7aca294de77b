// src/constants.rs

/// The literal a user types to pick an axis' "unspecified / use your judgement" level.
pub const UNSPECIFIED_TOKEN: &str = "-";

/// Suffix of the per-axis environment variable (`TELISME_VALUE`, ...).
pub const AXIS_ENV_SUFFIX: &str = "_VALUE";

/// Environment variable holding the default output language code.
pub const LANG_ENV_VAR: &str = "GIAC_LANG";

/// Environment variable pointing at the specification document.
pub const SPEC_ENV_VAR: &str = "GIAC_SPEC";

/// File names looked up, in order, in the working directory and in the config directory.
pub const SPEC_FILENAMES: &[&str] = &["spec.toml", "spec.json"];

/// Name of the application directory inside the user's config directory.
pub const CONFIG_DIR_NAME: &str = "giac";

/// Flag selecting the output language by code (`--lang en`).
pub const LANG_FLAG: &str = "lang";

/// Flag pointing at the specification document (`--spec ./my-spec.toml`).
pub const SPEC_FLAG: &str = "spec";

/// Flag selecting a single axis for the `spec` command.
pub const AXIS_FLAG: &str = "axis";

/// Flag filling missing axes with defaults instead of asking.
pub const AUTO_FLAG: &str = "auto";

/// Flag printing the selected profile before the prompt.
pub const PREVIEW_FLAG: &str = "preview";

/// Legacy and accented flag names, mapped to the axis id they stand for.
pub const AXIS_FLAG_ALIASES: &[(&str, &str)] = &[
    ("initiative", "telisme"),
    ("challenge", "confrontation"),
    ("densité", "density"),
    ("densite", "density"),
    ("énergie", "energy"),
    ("energie", "energy"),
    ("registre", "register"),
];

/// Legacy environment variables, consulted after the derived `<AXIS>_VALUE` one.
pub const AXIS_ENV_ALIASES: &[(&str, &str)] = &[("CHALLENGE_VALUE", "confrontation")];
