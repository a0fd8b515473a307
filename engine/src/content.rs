use std::collections::HashMap;

/// Sample character snapshots (YAML) shipped with the engine.
pub fn builtin_characters() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("aric", include_str!("../content/characters/aric.yaml")),
        ("brin", include_str!("../content/characters/brin.yaml")),
        ("tamsin", include_str!("../content/characters/tamsin.yaml")),
    ])
}
