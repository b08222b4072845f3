//! English inflection helpers for human-readable error messages
//!
//! Turns machine field keys into title-cased subjects and array indexes
//! into ordinals

/// Utility for rendering field keys and positions in English
pub struct Inflect;

impl Inflect {
    /// Convert a snake_case or kebab-case field key into a title-cased subject
    ///
    /// # Examples
    ///
    /// ```
    /// use intake::inflect::Inflect;
    ///
    /// assert_eq!(Inflect::titleize("newsletter_subscription"), "Newsletter Subscription");
    /// assert_eq!(Inflect::titleize("str1"), "Str1");
    /// assert_eq!(Inflect::titleize("first-name"), "First Name");
    /// ```
    pub fn titleize(key: &str) -> String {
        key.split(|c: char| c == '_' || c == '-' || c.is_whitespace())
            .filter(|word| !word.is_empty())
            .map(Self::capitalize)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Convert a zero-based position into a one-based English ordinal
    ///
    /// # Examples
    ///
    /// ```
    /// use intake::inflect::Inflect;
    ///
    /// assert_eq!(Inflect::ordinalize(0), "1st");
    /// assert_eq!(Inflect::ordinalize(1), "2nd");
    /// assert_eq!(Inflect::ordinalize(12), "13th");
    /// assert_eq!(Inflect::ordinalize(21), "22nd");
    /// ```
    pub fn ordinalize(index: usize) -> String {
        let n = index + 1;
        let suffix = match n % 100 {
            // 11th through 13th break the last-digit rule
            11..=13 => "th",
            _ => match n % 10 {
                1 => "st",
                2 => "nd",
                3 => "rd",
                _ => "th",
            },
        };
        format!("{n}{suffix}")
    }

    /// Upper-case the first letter of a word, leaving the rest untouched
    pub fn capitalize(word: &str) -> String {
        let mut chars = word.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}
