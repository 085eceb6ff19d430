//! Skill-list parsing.

/// Split a comma-separated skill string into individual skills.
///
/// Entries are trimmed and empties dropped; order and duplicates are
/// preserved (the analysis service treats the list as-is).
pub fn parse_skill_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_trims() {
        assert_eq!(
            parse_skill_list(" JavaScript, React ,  Node.js "),
            vec!["JavaScript", "React", "Node.js"]
        );
    }

    #[test]
    fn drops_empty_entries() {
        assert_eq!(parse_skill_list("Rust,, ,SQL,"), vec!["Rust", "SQL"]);
        assert!(parse_skill_list("").is_empty());
        assert!(parse_skill_list(" , ,").is_empty());
    }

    #[test]
    fn preserves_order_and_duplicates() {
        assert_eq!(parse_skill_list("Git,SQL,Git"), vec!["Git", "SQL", "Git"]);
    }
}
