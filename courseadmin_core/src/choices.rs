//! Answer options for multiple-choice style records.
//!
//! `correct_answer` on a question is a zero-based index into its options.
//! Nothing here (or in the repositories) rejects an index that falls outside
//! the list; the helpers just report `None` for it.

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// Ordered option texts, stored as a JSON array column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct AnswerOptions(pub Vec<String>);

impl AnswerOptions {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: i32) -> Option<&str> {
        let index = usize::try_from(index).ok()?;
        self.0.get(index).map(String::as_str)
    }

    pub fn contains_index(&self, index: i32) -> bool {
        self.get(index).is_some()
    }

    /// `(letter, text)` pairs as shown to authors: `A`, `B`, ...
    pub fn lettered(&self) -> impl Iterator<Item = (char, &str)> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, text)| Some((option_letter(i32::try_from(i).ok()?)?, text.as_str())))
    }
}

impl From<Vec<String>> for AnswerOptions {
    fn from(options: Vec<String>) -> Self {
        Self(options)
    }
}

impl<'a> From<Vec<&'a str>> for AnswerOptions {
    fn from(options: Vec<&'a str>) -> Self {
        Self(options.into_iter().map(str::to_owned).collect())
    }
}

/// Display letter for an option index: 0 -> `A`, 1 -> `B`, ... up to `Z`.
pub fn option_letter(index: i32) -> Option<char> {
    let offset = u8::try_from(index).ok().filter(|i| *i < 26)?;
    Some(char::from(b'A' + offset))
}

/// The option a `correct_answer` index points at, if it is in range.
pub fn correct_option(options: &AnswerOptions, correct_answer: i32) -> Option<&str> {
    options.get(correct_answer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_start_at_a() {
        assert_eq!(option_letter(0), Some('A'));
        assert_eq!(option_letter(3), Some('D'));
        assert_eq!(option_letter(25), Some('Z'));
        assert_eq!(option_letter(26), None);
        assert_eq!(option_letter(-1), None);
    }

    #[test]
    fn correct_option_is_none_when_out_of_range() {
        let options = AnswerOptions::from(vec!["a", "b", "c", "d"]);
        assert_eq!(correct_option(&options, 2), Some("c"));
        assert_eq!(correct_option(&options, 5), None);
        assert_eq!(correct_option(&options, -1), None);
        assert!(!options.contains_index(4));
    }

    #[test]
    fn lettered_pairs_follow_option_order() {
        let options = AnswerOptions::from(vec!["red", "green"]);
        let pairs: Vec<_> = options.lettered().collect();
        assert_eq!(pairs, vec![('A', "red"), ('B', "green")]);
    }

    #[test]
    fn serializes_as_bare_array() {
        let options = AnswerOptions::from(vec!["x", "y"]);
        assert_eq!(serde_json::to_string(&options).unwrap(), r#"["x","y"]"#);
    }
}
