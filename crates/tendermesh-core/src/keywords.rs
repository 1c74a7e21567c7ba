//! Fixed keyword vocabularies for scoring and requirement inference.

/// Technology keywords that earn a tender its base-score bonus.
///
/// Matched case-sensitively as substrings against title, category, and
/// requirement tags, so "Cloud" hits "Cloud migration" but not
/// "cloud migration".
pub const TECH_KEYWORDS: &[&str] = &["AI", "Technology", "Software", "Digital", "Cloud", "Data"];

/// Requirement tags with the lowercase trigger words that imply them.
///
/// Adapters run titles and descriptions through this table when a source
/// record carries no explicit tags.
pub const REQUIREMENT_VOCABULARY: &[(&str, &[&str])] = &[
    (
        "Software Development",
        &["software", "development", "programming", "application"],
    ),
    ("Cloud Computing", &["cloud", "hosting", "aws", "azure"]),
    ("Cybersecurity", &["security", "cyber", "encryption"]),
    (
        "AI/ML",
        &["artificial intelligence", "machine learning", "automation"],
    ),
    ("Data Analytics", &["data", "analytics", "database"]),
    ("IT Consulting", &["consulting", "advisory", "digital strategy"]),
    ("Infrastructure", &["infrastructure", "network", "hardware"]),
    (
        "Project Management",
        &["project management", "delivery", "programme"],
    ),
];

/// Tag assigned when no vocabulary trigger matches.
pub const DEFAULT_REQUIREMENT: &str = "General Services";

/// True when any technology keyword appears in the title, category, or a
/// requirement tag. Matching is case-sensitive.
pub fn has_tech_keyword(title: &str, category: &str, requirements: &[String]) -> bool {
    TECH_KEYWORDS.iter().any(|&keyword| {
        title.contains(keyword)
            || category.contains(keyword)
            || requirements.iter().any(|tag| tag.contains(keyword))
    })
}

/// Infer requirement tags by keyword-matching `text` against the vocabulary.
///
/// Tags come back in vocabulary order, each at most once. Text that matches
/// nothing yields the single [`DEFAULT_REQUIREMENT`] tag.
pub fn infer_requirements(text: &str) -> Vec<String> {
    let haystack = text.to_lowercase();
    let mut tags: Vec<String> = REQUIREMENT_VOCABULARY
        .iter()
        .filter(|(_, triggers)| triggers.iter().any(|trigger| haystack.contains(trigger)))
        .map(|(tag, _)| (*tag).to_string())
        .collect();
    if tags.is_empty() {
        tags.push(DEFAULT_REQUIREMENT.to_string());
    }
    tags
}
