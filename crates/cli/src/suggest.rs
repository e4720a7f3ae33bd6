use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Finds the installed bundle name that best matches a name the user typed.
///
/// Matching works both ways, so an abbreviation (`dcg`) and an over-long
/// name (`dcgov-cli`) both find `dcgov`.
pub fn closest_match<'a>(query: &str, candidates: &'a [String]) -> Option<&'a str> {
    let matcher = SkimMatcherV2::default();

    candidates
        .iter()
        .filter(|candidate| candidate.as_str() != query)
        .filter_map(|candidate| {
            matcher
                .fuzzy_match(candidate, query)
                .or_else(|| matcher.fuzzy_match(query, candidate))
                .map(|score| (score, candidate.as_str()))
        })
        .max_by_key(|(score, _)| *score)
        .map(|(_, candidate)| candidate)
}
