//! Levels embedded in the binary

/// Play order of the built-in levels
pub const LEVEL_ORDER: [&str; 3] = ["tutorial", "level1", "level2"];

const TUTORIAL: &str = include_str!("../../assets/levels/tutorial.ron");
const LEVEL1: &str = include_str!("../../assets/levels/level1.ron");
const LEVEL2: &str = include_str!("../../assets/levels/level2.ron");

/// RON source of a built-in level
pub(super) fn source(name: &str) -> Option<&'static str> {
    match name {
        "tutorial" => Some(TUTORIAL),
        "level1" => Some(LEVEL1),
        "level2" => Some(LEVEL2),
        _ => None,
    }
}

/// Names of all built-in levels, in play order
pub fn builtin_names() -> impl Iterator<Item = &'static str> {
    LEVEL_ORDER.into_iter()
}

/// Built-in level that follows `name`, if any
pub fn next_level(name: &str) -> Option<&'static str> {
    let index = LEVEL_ORDER.iter().position(|level| *level == name)?;
    LEVEL_ORDER.get(index + 1).copied()
}
