use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Matcher, Utf32Str};

/// Fuzzy filter for `--list <filter>`.
pub struct FuzzyMatcher {
    matcher: Matcher,
    pattern: Pattern,
}

impl FuzzyMatcher {
    pub fn new(query: &str) -> Self {
        Self {
            matcher: Matcher::new(nucleo_matcher::Config::DEFAULT),
            pattern: Pattern::parse(query, CaseMatching::Smart, Normalization::Smart),
        }
    }

    pub fn matches(&mut self, name: &str) -> bool {
        let mut buf = Vec::new();
        let haystack = Utf32Str::new(name, &mut buf);
        self.pattern.score(haystack, &mut self.matcher).is_some()
    }
}
