// src/core/fixtures.rs
//
// Shared test specs.

use crate::models::{Axis, AxisId, Level, LevelDefinition, Spec};

pub(crate) fn id(raw: &str) -> AxisId {
    AxisId::new(raw).unwrap()
}

pub(crate) fn level_def(level: Level, name_fr: &str, name_en: &str) -> LevelDefinition {
    LevelDefinition {
        level,
        name_fr: name_fr.to_string(),
        name_en: name_en.to_string(),
        description_fr: format!("Description {}", name_fr),
        description_en: format!("{} description", name_en),
        prompt_fr: format!("Prompt {}", name_fr.to_lowercase()),
        prompt_en: format!("{} prompt", name_en),
    }
}

pub(crate) fn numbered_level(n: u32) -> LevelDefinition {
    level_def(Level::Value(n), &format!("Niveau {}", n), &format!("Level {}", n))
}

pub(crate) fn axis(raw_id: &str, priority: u32, initial: &str, names: (&str, &str), levels: &[u32]) -> Axis {
    Axis {
        id: id(raw_id),
        priority,
        initials: vec![initial.to_string()],
        aliases: Vec::new(),
        name_fr: names.0.to_string(),
        name_en: names.1.to_string(),
        description_fr: format!("Axe {}", names.0),
        description_en: format!("{} axis", names.1),
        levels: levels.iter().map(|n| numbered_level(*n)).collect(),
        default: None,
    }
}

pub(crate) fn spec_with(axes: Vec<Axis>) -> Spec {
    Spec {
        description_fr: "Description FR".to_string(),
        description_en: "Description EN".to_string(),
        prompt_fragment_fr: "Fragment FR global".to_string(),
        prompt_fragment_en: "Global fragment EN".to_string(),
        axes: axes.into_iter().map(|a| (a.id.clone(), a)).collect(),
    }
}

/// `telisme` (priority 1, levels 0/5/10) and `confrontation` (priority 2, levels 0/3).
pub(crate) fn two_axis_spec() -> Spec {
    spec_with(vec![
        axis("telisme", 1, "T", ("Télisme", "Telism"), &[0, 5, 10]),
        axis("confrontation", 2, "C", ("Confrontation", "Challenge"), &[0, 3]),
    ])
}

/// An axis that also defines the unspecified level.
pub(crate) fn axis_with_unspecified(raw_id: &str, priority: u32, initial: &str) -> Axis {
    let mut axis = axis(raw_id, priority, initial, ("Registre", "Register"), &[0, 5]);
    axis.levels.insert(
        0,
        LevelDefinition {
            level: Level::Unspecified,
            name_fr: "Non spécifié".to_string(),
            name_en: "Unspecified".to_string(),
            description_fr: "Fais comme tu sens".to_string(),
            description_en: "Use your judgement".to_string(),
            prompt_fr: "fais comme tu sens".to_string(),
            prompt_en: "use your judgement".to_string(),
        },
    );
    axis
}
