/// Convert a label to a lowercase, hyphen-separated slug
///
/// Runs of non-alphanumeric characters collapse to a single hyphen, and
/// leading/trailing hyphens are dropped ("Guilt/Shame" → "guilt-shame").
/// Lowercasing is full Unicode so labels in a replacement dataset such as
/// "Überwältigt" slug the same whatever case the user types.
pub fn slugify(text: &str) -> String {
    let mut result = String::new();
    let mut prev_was_hyphen = true;

    for c in text.chars() {
        if c.is_alphanumeric() {
            result.extend(c.to_lowercase());
            prev_was_hyphen = false;
        } else if !prev_was_hyphen {
            result.push('-');
            prev_was_hyphen = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_multi_word() {
        assert_eq!(slugify("Unmet Expectations"), "unmet-expectations");
        assert_eq!(slugify("Trust Broken"), "trust-broken");
    }

    #[test]
    fn test_slugify_slash_and_hyphen() {
        assert_eq!(slugify("Guilt/Shame"), "guilt-shame");
        assert_eq!(slugify("Self-Doubt"), "self-doubt");
    }

    #[test]
    fn test_slugify_non_ascii_lowercases() {
        assert_eq!(slugify("Überwältigt"), "überwältigt");
        assert_eq!(slugify("ÉMU / Élan"), "ému-élan");
        assert_eq!(slugify("Überwältigt"), slugify("überwältigt"));
    }

    #[test]
    fn test_slugify_trims_separators() {
        assert_eq!(slugify("  Loss  "), "loss");
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify(""), "");
    }
}
