//! Display formatting for generated names
//!
//! Raw corpus tokens arrive uppercase or with scraping artifacts like a
//! trailing parenthetical (`Smith (Lefty)`). Every style formats identically:
//! strip the parenthetical, capitalize each hyphen- or space-separated
//! sub-word, and compose `First "Nickname" Last`. Cleaning and
//! capitalization are idempotent, so already-clean tokens pass through
//! unchanged.

/// Strip a trailing parenthetical, or a lone trailing `)` with no opener.
pub fn clean_token(name: &str) -> &str {
    if !name.ends_with(')') {
        return name;
    }
    match name.rfind('(') {
        Some(open) => name[..open].trim_end(),
        None => name[..name.len() - 1].trim_end(),
    }
}

/// Capitalize each hyphen- or space-separated sub-word independently.
pub fn capitalize_token(name: &str) -> String {
    if name.contains('-') {
        name.split('-')
            .map(capitalize_word)
            .collect::<Vec<_>>()
            .join("-")
    } else {
        name.split_whitespace()
            .map(capitalize_word)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Clean and capitalize one name token.
pub fn format_token(name: &str) -> String {
    capitalize_token(clean_token(name))
}

/// Compose the final display string: `First "Nickname" Last`.
pub fn full_name(first: &str, last: &str, nickname: Option<&str>) -> String {
    let first = format_token(first);
    let last = format_token(last);
    match nickname {
        Some(nick) => format!("{first} \"{}\" {last}", format_token(nick)),
        None => format!("{first} {last}"),
    }
}
