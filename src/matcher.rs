/// The user-supplied search terms.
///
/// Terms keep their original spelling for echoing back; matching uses a
/// lowercased copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerms {
    original: Vec<String>,
    lowered: Vec<String>,
}

impl SearchTerms {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let original: Vec<String> = terms
            .into_iter()
            .map(Into::into)
            .filter(|t: &String| !t.is_empty())
            .collect();
        let lowered = original.iter().map(|t| t.to_lowercase()).collect();
        Self { original, lowered }
    }

    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.original
    }

    /// Return `title` if it contains at least one term, ignoring case.
    ///
    /// An empty title never matches.
    pub fn matches<'t>(&self, title: &'t str) -> Option<&'t str> {
        if title.is_empty() {
            return None;
        }
        let lowered = title.to_lowercase();
        self.lowered
            .iter()
            .any(|term| lowered.contains(term.as_str()))
            .then_some(title)
    }
}

impl std::fmt::Display for SearchTerms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.original.join(" "))
    }
}
