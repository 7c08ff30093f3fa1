use std::sync::LazyLock;

use regex::Regex;

pub trait StrExt {
    /// Return whether `self` is a keyword list containing `name` as a
    /// complete word.
    ///
    /// Matching is ASCII case insensitive. Keywords are separated by
    /// anything that isn't a letter, so partial words never match.
    ///
    /// ```
    /// # use util::StrExt;
    /// assert!("grey wolf".has_keyword("wolf"));
    /// assert!("grey wolf".has_keyword("GREY"));
    /// assert!(!"grey wolf".has_keyword("wol"));
    /// assert!(!"grey wolf".has_keyword("grey wolf"));
    /// ```
    fn has_keyword(&self, name: &str) -> bool;

    /// Pack repeating message lines into a single message with a multiplier
    /// count.
    ///
    /// If the function returns a value, the previous message in the message queue
    /// is intended to be replaced with the value string and the redundant new
    /// message discarded. Otherwise the new message is appended to the queue.
    ///
    /// ```
    /// # use util::StrExt;
    /// assert_eq!("Bump.".deduplicate_message("Jump."), None);
    ///
    /// assert_eq!("Bump.".deduplicate_message("Bump."),
    ///     Some("Bump. (x2)".to_string()));
    /// assert_eq!("Bump. (x2)".deduplicate_message("Bump."),
    ///     Some("Bump. (x3)".to_string()));
    ///
    /// // Refuse to parse stupidly large numbers.
    /// assert_eq!("Bump. (x131236197263917263)".deduplicate_message("Bump."),
    ///     None);
    /// ```
    fn deduplicate_message(&self, next: &str) -> Option<String>;

    fn is_capitalized(&self) -> bool;

    fn capitalize(&self) -> String;
}

impl StrExt for str {
    fn has_keyword(&self, name: &str) -> bool {
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphabetic()) {
            return false;
        }

        self.split(|c: char| !c.is_ascii_alphabetic())
            .any(|word| word.eq_ignore_ascii_case(name))
    }

    fn deduplicate_message(&self, next: &str) -> Option<String> {
        static RE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"^(.*) \(x(\d{1,8})\)$").unwrap());

        let mut base = self;
        let mut count: usize = 1;

        if let Some(caps) = RE.captures(self) {
            base = caps.get(1).expect("Invalid regex").as_str();
            count = caps
                .get(2)
                .expect("Invalid regex")
                .as_str()
                .parse()
                .expect("Invalid regex");
        }

        if base == next {
            Some(format!("{next} (x{})", count + 1))
        } else {
            None
        }
    }

    fn is_capitalized(&self) -> bool {
        self.chars()
            .next()
            .map(|c| c.is_uppercase())
            .unwrap_or(false)
    }

    fn capitalize(&self) -> String {
        let mut chars = self.chars();
        match chars.next() {
            None => String::new(),
            Some(c) => c.to_uppercase().chain(chars).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords() {
        for &(list, name, expected) in &[
            ("bob", "bob", true),
            ("bob", "BOB", true),
            ("guard bob", "bob", true),
            ("guard-bob", "bob", true),
            ("bobby", "bob", false),
            ("bob", "bobby", false),
            ("", "bob", false),
            ("bob", "", false),
            ("bob", "b b", false),
        ] {
            assert_eq!(list.has_keyword(name), expected, "{list:?} {name:?}");
        }
    }

    #[test]
    fn capitalizers() {
        for &(text, cap) in &[
            ("", ""),
            ("a", "A"),
            ("A", "A"),
            ("abc", "Abc"),
            ("aBC", "ABC"),
        ] {
            assert_eq!(text.capitalize(), cap);
            if !text.is_empty() {
                assert!(text.capitalize().is_capitalized());
            }
        }
    }
}
