use larder_core::Vocabulary;

/// Final gate on a cleaned candidate name: keep it only when a grocery
/// keyword appears somewhere in it.
///
/// This is a plain substring test. `"berry"` accepts `"Blueberry"` and also
/// any unrelated word that happens to contain it.
pub fn is_grocery(name: &str, vocabulary: &Vocabulary) -> bool {
    vocabulary.mentions_grocery(name)
}
