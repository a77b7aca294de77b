// src/core/arg_parser.rs

use crate::constants::UNSPECIFIED_TOKEN;
use std::collections::HashMap;

/// The value attached to a flag on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    /// `--key value` or `--key=value`.
    Text(String),
    /// A bare `--key`.
    Switch,
}

/// Command-line tokens split into named flags and positional arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFlags {
    named: HashMap<String, FlagValue>,
    positional: Vec<String>,
}

impl ParsedFlags {
    /// Parses raw CLI tokens.
    ///
    /// # Logic:
    /// - A token starting with `-` or `--` is a flag.
    /// - `--key=value` / `-k=value` carry their value inline (the value may be empty).
    /// - Otherwise the next token is the value, unless it starts with `-` (another flag, or the
    ///   unspecified token), in which case the flag is a switch and the next token is parsed
    ///   on its own.
    /// - Anything else is positional. A flag with an empty name (`-`, `--`) is dropped.
    /// - A repeated flag keeps its last value.
    pub fn parse(tokens: &[String]) -> Self {
        let mut named = HashMap::new();
        let mut positional = Vec::new();
        let mut tokens_iter = tokens.iter().map(String::as_str).peekable();

        while let Some(token) = tokens_iter.next() {
            let name_opt = if let Some(name) = token.strip_prefix("--") {
                Some(name)
            } else {
                token.strip_prefix('-')
            };

            let Some(body) = name_opt else {
                positional.push(token.to_string());
                continue;
            };

            let (key, value) = match body.split_once('=') {
                Some((key, value)) => (key, FlagValue::Text(value.to_string())),
                None => {
                    let takes_next = tokens_iter
                        .peek()
                        .is_some_and(|next| !next.starts_with('-') && *next != UNSPECIFIED_TOKEN);
                    match tokens_iter.next_if(|_| takes_next) {
                        Some(next) => (body, FlagValue::Text(next.to_string())),
                        None => (body, FlagValue::Switch),
                    }
                }
            };

            if key.is_empty() {
                log::trace!("Ignoring flag token with an empty name: '{}'", token);
                continue;
            }
            log::trace!("Parsed flag '{}' = {:?}", key, value);
            named.insert(key.to_string(), value);
        }

        Self { named, positional }
    }

    /// The raw value of a flag.
    pub fn get(&self, key: &str) -> Option<&FlagValue> {
        self.named.get(key)
    }

    /// The text value of a flag. A bare switch has none.
    pub fn value(&self, key: &str) -> Option<&str> {
        match self.named.get(key)? {
            FlagValue::Text(value) => Some(value.as_str()),
            FlagValue::Switch => None,
        }
    }

    /// Whether the flag was given at all, with or without a value.
    pub fn contains(&self, key: &str) -> bool {
        self.named.contains_key(key)
    }

    /// Whether a boolean flag is on: `--key`, or an explicit `--key=true`.
    pub fn is_on(&self, key: &str) -> bool {
        match self.named.get(key) {
            Some(FlagValue::Switch) => true,
            Some(FlagValue::Text(value)) => value == "true",
            None => false,
        }
    }

    /// Non-flag tokens, in order.
    pub fn positional(&self) -> &[String] {
        &self.positional
    }
}
