/// Canonical labels for the free-text role column. Matching is by
/// case-insensitive substring, first hit wins; anything unmatched renders
/// as `Other`.
const ROLE_LABELS: &[(&str, &str)] = &[
    ("civil engineer", "Civil Engineer"),
    ("ceo", "CEO"),
    ("student", "Student"),
    ("teacher", "Teacher"),
    ("auxiliar / intern", "Auxiliar / Intern"),
    ("project manager", "Project Manager"),
    ("designer / consulter", "Designer / Consulter"),
];

pub const OTHER_ROLE: &str = "Other";

pub fn clean_role(raw: &str) -> String {
    let needle = raw.trim().to_lowercase();
    if needle.is_empty() {
        return OTHER_ROLE.to_string();
    }
    for (key, label) in ROLE_LABELS {
        if needle.contains(key) {
            return (*label).to_string();
        }
    }
    OTHER_ROLE.to_string()
}

#[cfg(test)]
mod tests {
    use super::clean_role;

    #[test]
    fn known_roles_normalize_to_canonical_labels() {
        assert_eq!(clean_role("Senior Civil Engineer"), "Civil Engineer");
        assert_eq!(clean_role("  ceo / founder "), "CEO");
        assert_eq!(clean_role("PROJECT MANAGER"), "Project Manager");
    }

    #[test]
    fn unknown_and_empty_roles_render_other() {
        assert_eq!(clean_role("astronaut"), "Other");
        assert_eq!(clean_role("   "), "Other");
    }
}
