//! Small casing helpers shared by name registration and title addressing.

/// Uppercase the first letter of every run of letters and lowercase the rest.
///
/// Any non-letter character starts a new run, so `"o'neil"` becomes
/// `"O'Neil"` and `"r2d2"` becomes `"R2D2"`.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_word = false;
    for c in input.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Uppercase the first character and lowercase everything after it.
pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case_words() {
        assert_eq!(title_case("quantum physics"), "Quantum Physics");
        assert_eq!(title_case("ALICE"), "Alice");
        assert_eq!(title_case("o'neil"), "O'Neil");
        assert_eq!(title_case("r2d2"), "R2D2");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_title_case_unicode() {
        assert_eq!(title_case("élodie"), "Élodie");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("leonardo DA vinci"), "Leonardo da vinci");
        assert_eq!(capitalize("x"), "X");
        assert_eq!(capitalize(""), "");
    }
}
