//! Input normalization for prompt and flag answers.
//!
//! Every function here is total: unusable input falls back to the default
//! instead of failing.

/// Resolve a raw answer against an option list.
///
/// - an integer `n` with `1 <= n <= options.len()` selects `options[n - 1]`
/// - text equal to an option (ignoring case) becomes that option's spelling
/// - empty input yields `default`
/// - anything else is returned trimmed and unchanged
pub fn resolve_choice(raw: &str, options: &[&str], default: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return default.to_string();
    }

    if let Some(option) = trimmed
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| options.get(index))
    {
        return (*option).to_string();
    }

    options
        .iter()
        .find(|option| option.eq_ignore_ascii_case(trimmed))
        .map_or_else(|| trimmed.to_string(), |option| (*option).to_string())
}

/// Resolve a yes/no answer; anything unrecognised yields `default`.
pub fn resolve_yes_no(raw: &str, default: bool) -> bool {
    match raw.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" | "1" | "on" => true,
        "n" | "no" | "false" | "0" | "off" => false,
        _ => default,
    }
}

/// Split a comma- or whitespace-separated list, dropping blanks and repeats.
pub fn split_list(raw: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for item in raw.split(|c: char| c == ',' || c.is_whitespace()) {
        if !item.is_empty() && !items.iter().any(|seen| seen == item) {
            items.push(item.to_string());
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TYPES: &[&str] = &["Web App", "API Service", "CLI Tool", "Library", "Fullstack"];

    #[test]
    fn numeric_selection_is_one_based() {
        assert_eq!(resolve_choice("2", TYPES, "Web App"), "API Service");
        assert_eq!(resolve_choice(" 5 ", TYPES, "Web App"), "Fullstack");
    }

    #[test]
    fn out_of_range_numbers_are_kept_as_text() {
        assert_eq!(resolve_choice("0", TYPES, "Web App"), "0");
        assert_eq!(resolve_choice("6", TYPES, "Web App"), "6");
        assert_eq!(resolve_choice("-1", TYPES, "Web App"), "-1");
    }

    #[test]
    fn empty_input_takes_the_default() {
        assert_eq!(resolve_choice("", TYPES, "Web App"), "Web App");
        assert_eq!(resolve_choice("   ", TYPES, "Library"), "Library");
        assert_eq!(resolve_choice("", &[], "my-project"), "my-project");
    }

    #[test]
    fn literal_text_is_canonicalised() {
        assert_eq!(resolve_choice("api service", TYPES, "Web App"), "API Service");
        assert_eq!(resolve_choice("  Elixir ", TYPES, "Web App"), "Elixir");
    }

    #[test]
    fn yes_no_answers() {
        assert!(resolve_yes_no("Y", false));
        assert!(!resolve_yes_no("no", true));
        assert!(resolve_yes_no("", true));
        assert!(!resolve_yes_no("maybe", false));
    }

    #[test]
    fn lists_split_on_commas_and_spaces() {
        assert_eq!(
            split_list("express, zod  redis,,express"),
            vec!["express", "zod", "redis"]
        );
        assert!(split_list("  ").is_empty());
    }

    proptest! {
        #[test]
        fn numeric_and_literal_selection_agree(index in 0usize..5) {
            let by_number = resolve_choice(&(index + 1).to_string(), TYPES, "Web App");
            let by_text = resolve_choice(TYPES[index], TYPES, "Web App");
            let by_lower = resolve_choice(&TYPES[index].to_lowercase(), TYPES, "Web App");
            prop_assert_eq!(&by_number, &by_text);
            prop_assert_eq!(&by_text, &by_lower);
        }

        #[test]
        fn resolve_choice_never_panics(raw in ".*") {
            let _ = resolve_choice(&raw, TYPES, "Web App");
        }
    }
}
