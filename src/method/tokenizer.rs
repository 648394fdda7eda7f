/// Keywords that may follow the verb, before `By`.
const SUBJECT_KEYWORDS: &[&str] = &["OrderBy", "By", "First", "Top"];

/// Keywords that end a predicate segment wherever they appear.
const CONNECTORS: &[&str] = &["OrderBy", "And", "Or"];

/// Keywords that trail a property, longest first so prefixes never win.
const SUFFIX_KEYWORDS: &[&str] = &[
    "IgnoreCase",
    "GreaterThanEqual",
    "GreaterThan",
    "LessThanEqual",
    "LessThan",
    "StartsWith",
    "EndsWith",
    "Contains",
    "Between",
    "Equals",
    "False",
    "True",
    "Null",
    "Like",
    "Not",
    "In",
];

const ORDER_KEYWORDS: &[&str] = &["Desc", "Asc"];

/// Splits a derived-query method name into semantic words.
///
/// ```text
/// deleteByStreetNameIgnoreCaseNot => delete | By | StreetName | IgnoreCase | Not
/// findFirst10ByAge               => find | First | 10 | By | Age
/// findBySalary_Currency          => find | By | Salary_Currency
/// ```
///
/// Tokenizing never fails. Casing the keywords do not recognize just yields
/// word boundaries at lower-to-upper transitions.
#[derive(Debug, Clone, Copy)]
pub struct MethodTokenizer<'a> {
    method: &'a str,
}

impl<'a> MethodTokenizer<'a> {
    pub fn new(method: &'a str) -> Self {
        MethodTokenizer { method }
    }

    pub fn method(&self) -> &'a str {
        self.method
    }

    /// A fresh pass over the words; call again to restart.
    pub fn words(&self) -> Words<'a> {
        Words {
            rest: self.method,
            section: Section::Verb,
        }
    }
}

impl<'a> IntoIterator for &MethodTokenizer<'a> {
    type Item = &'a str;
    type IntoIter = Words<'a>;

    fn into_iter(self) -> Words<'a> {
        self.words()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Verb,
    Subject,
    Predicate,
    Order,
}

/// Lazy word iterator produced by [`MethodTokenizer::words`].
#[derive(Debug, Clone)]
pub struct Words<'a> {
    rest: &'a str,
    section: Section,
}

impl<'a> Words<'a> {
    fn take(&mut self, len: usize) -> &'a str {
        let (word, rest) = self.rest.split_at(len);
        self.rest = rest;
        word
    }

    /// Consume humps until `ends` accepts the text at a hump boundary.
    fn take_property(&mut self, ends: impl Fn(&str) -> bool) -> &'a str {
        let mut len = hump_len(self.rest);
        while len < self.rest.len() && !ends(&self.rest[len..]) {
            len += hump_len(&self.rest[len..]);
        }
        self.take(len)
    }
}

impl<'a> Iterator for Words<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }

        let word = match self.section {
            Section::Verb => {
                self.section = Section::Subject;
                let len = self
                    .rest
                    .find(|c: char| c.is_uppercase())
                    .filter(|&n| n > 0)
                    .unwrap_or_else(|| hump_len(self.rest));
                self.take(len)
            }
            Section::Subject => {
                let digits = self
                    .rest
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(self.rest.len());
                if digits > 0 {
                    self.take(digits)
                } else if let Some(keyword) = match_keyword(self.rest, SUBJECT_KEYWORDS) {
                    match keyword {
                        "By" => self.section = Section::Predicate,
                        "OrderBy" => self.section = Section::Order,
                        _ => {}
                    }
                    self.take(keyword.len())
                } else {
                    let len = hump_len(self.rest);
                    self.take(len)
                }
            }
            Section::Predicate => {
                if let Some(keyword) = match_keyword(self.rest, CONNECTORS) {
                    if keyword == "OrderBy" {
                        self.section = Section::Order;
                    }
                    self.take(keyword.len())
                } else if let Some(keyword) = match_suffix(self.rest) {
                    self.take(keyword.len())
                } else {
                    self.take_property(|rest| {
                        match_keyword(rest, CONNECTORS).is_some() || match_suffix(rest).is_some()
                    })
                }
            }
            Section::Order => match match_keyword(self.rest, ORDER_KEYWORDS) {
                Some(keyword) => self.take(keyword.len()),
                None => self.take_property(|rest| match_keyword(rest, ORDER_KEYWORDS).is_some()),
            },
        };

        tracing::trace!(word, "derived query word");
        Some(word)
    }
}

/// First keyword that `s` starts with and that ends on a word boundary.
///
/// `First` and `Top` may also be followed directly by digits.
fn match_keyword(s: &str, keywords: &[&'static str]) -> Option<&'static str> {
    keywords.iter().copied().find(|keyword| {
        s.starts_with(keyword)
            && match s[keyword.len()..].chars().next() {
                None => true,
                Some(c) if c.is_uppercase() => true,
                Some(c) if c.is_ascii_digit() => matches!(*keyword, "First" | "Top"),
                Some(_) => false,
            }
    })
}

/// A suffix keyword at the start of `s`, provided only suffix keywords follow
/// it up to the next connector. `InStock` and `LikeCount` stay properties.
fn match_suffix(s: &str) -> Option<&'static str> {
    let keyword = match_keyword(s, SUFFIX_KEYWORDS)?;
    let mut rest = &s[keyword.len()..];
    while !rest.is_empty() && match_keyword(rest, CONNECTORS).is_none() {
        let next = match_keyword(rest, SUFFIX_KEYWORDS)?;
        rest = &rest[next.len()..];
    }
    Some(keyword)
}

/// Byte length of the camel-case hump at the start of `s`.
///
/// An underscore glues the next character to the current hump, so
/// `Salary_Currency` stays one hump.
fn hump_len(s: &str) -> usize {
    let mut chars = s.char_indices();
    let Some((_, first)) = chars.next() else {
        return 0;
    };
    let mut len = first.len_utf8();
    let mut glued = first == '_';

    for (i, c) in chars {
        if c.is_uppercase() && !glued {
            return i;
        }
        glued = c == '_';
        len = i + c.len_utf8();
    }
    len
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(method: &str) -> Vec<&str> {
        MethodTokenizer::new(method).words().collect()
    }

    #[test]
    fn test_hump_len() {
        assert_eq!(hump_len("StreetName"), 6);
        assert_eq!(hump_len("Salary_CurrencyAnd"), 15);
        assert_eq!(hump_len("URL"), 1);
        assert_eq!(hump_len(""), 0);
    }

    #[test]
    fn test_keyword_needs_boundary() {
        assert_eq!(match_keyword("InStock", SUFFIX_KEYWORDS), Some("In"));
        assert_eq!(match_keyword("Index", SUFFIX_KEYWORDS), None);
        assert_eq!(match_keyword("Origin", CONNECTORS), None);
        assert_eq!(match_keyword("First10", SUBJECT_KEYWORDS), Some("First"));
    }

    #[test]
    fn test_suffix_runs_to_segment_end() {
        assert_eq!(match_suffix("In"), Some("In"));
        assert_eq!(match_suffix("IgnoreCaseNotLikeAndAge"), Some("IgnoreCase"));
        assert_eq!(match_suffix("InStock"), None);
        assert_eq!(match_suffix("InDateOrAge"), None);
    }

    #[test]
    fn test_restartable() {
        let tokenizer = MethodTokenizer::new("findByName");
        let first: Vec<_> = tokenizer.words().collect();
        let second: Vec<_> = tokenizer.words().collect();
        assert_eq!(first, second);
        assert_eq!(words("findByName"), vec!["find", "By", "Name"]);
    }
}
