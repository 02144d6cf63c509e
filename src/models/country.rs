/// Country codes the recommender knows by display name
const COUNTRY_NAMES: &[(&str, &str)] = &[
    ("IN", "India"),
    ("NL", "Netherlands"),
    ("JP", "Japan"),
    ("US", "USA"),
    ("PL", "Poland"),
];

/// Maps an ISO country code to the name the backend filters by.
///
/// Unknown codes are returned verbatim.
pub fn country_code_to_name(code: &str) -> &str {
    COUNTRY_NAMES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, name)| *name)
        .unwrap_or(code)
}
