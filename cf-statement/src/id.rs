//! Problem identifiers
use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::Error;

/// Identifies a problem by its contest number and index within the contest.
///
/// Parses from the forms used across the site: `158A`, `158/A`, `158 A` and `1791F1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProblemId {
    contest: u32,
    index: String,
}

impl ProblemId {
    /// Constructs a `ProblemId`, normalizing the index to uppercase.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidProblemId`] if `index` does not start with a letter or contains
    /// anything but letters and digits.
    pub fn new(contest: u32, index: &str) -> Result<ProblemId, Error> {
        let valid = index.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
            && index.chars().all(|c| c.is_ascii_alphanumeric());

        if !valid {
            return Err(Error::InvalidProblemId(format!("{contest}{index}")));
        }

        Ok(ProblemId {
            contest,
            index: index.to_ascii_uppercase(),
        })
    }

    /// The contest number.
    #[must_use]
    pub const fn contest(&self) -> u32 {
        self.contest
    }

    /// The problem index within the contest, e.g. `A` or `F1`.
    #[must_use]
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Returns the URL of the problem page relative to `base`.
    ///
    /// The path of `base` is treated as a directory whether or not it ends in a slash, so both
    /// `http://host/mirror` and `http://host/mirror/` resolve below `/mirror/`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if `base` cannot be joined with a path.
    pub fn url(&self, base: &Url) -> Result<Url, Error> {
        let mut base = base.clone();

        if !base.path().ends_with('/') {
            let dir = format!("{}/", base.path());
            base.set_path(&dir);
        }

        let path = format!("contest/{}/problem/{}", self.contest, self.index);

        Ok(base.join(&path)?)
    }
}

impl FromStr for ProblemId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        let (contest, index) = s.split_at(split);
        let index = index.trim_start_matches(['/', ' ']);
        let contest = contest
            .parse()
            .map_err(|_| Error::InvalidProblemId(s.to_string()))?;

        ProblemId::new(contest, index).map_err(|_| Error::InvalidProblemId(s.to_string()))
    }
}

impl fmt::Display for ProblemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.contest, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_forms() {
        for input in ["158A", "158/A", "158 A", " 158a "] {
            let id: ProblemId = input.parse().unwrap();

            assert_eq!(id.contest(), 158);
            assert_eq!(id.index(), "A");
        }

        let id: ProblemId = "1791F1".parse().unwrap();

        assert_eq!(id.contest(), 1791);
        assert_eq!(id.index(), "F1");
        assert_eq!(id.to_string(), "1791F1");
    }

    #[test]
    fn parse_rejects_garbage() {
        for input in ["", "A", "158", "158/", "158/1A", "158A-", "abc/A"] {
            assert!(
                matches!(input.parse::<ProblemId>(), Err(Error::InvalidProblemId(_))),
                "{input:?} should not parse"
            );
        }
    }

    #[test]
    fn url_is_relative_to_base() {
        let id: ProblemId = "158A".parse().unwrap();
        let base = Url::parse("https://codeforces.com").unwrap();
        let mirror = Url::parse("http://localhost:8080/mirror/").unwrap();

        assert_eq!(
            id.url(&base).unwrap().as_str(),
            "https://codeforces.com/contest/158/problem/A"
        );
        assert_eq!(
            id.url(&mirror).unwrap().as_str(),
            "http://localhost:8080/mirror/contest/158/problem/A"
        );
    }

    #[test]
    fn url_keeps_base_path_without_trailing_slash() {
        let id: ProblemId = "158A".parse().unwrap();
        let mirror = Url::parse("http://localhost:8080/mirror").unwrap();
        let nested = Url::parse("http://localhost:8080/a/b?lang=en").unwrap();

        assert_eq!(
            id.url(&mirror).unwrap().as_str(),
            "http://localhost:8080/mirror/contest/158/problem/A"
        );
        assert_eq!(
            id.url(&nested).unwrap().as_str(),
            "http://localhost:8080/a/b/contest/158/problem/A"
        );
        assert_eq!(mirror.as_str(), "http://localhost:8080/mirror");
    }
}
