//! Sample dialogue templates keyed by speaking style.

/// Style used when the requested one has no templates.
pub const FALLBACK_STYLE: &str = "casual";

const STYLE_TEMPLATES: &[(&str, [&str; 3])] = &[
    (
        "formal",
        [
            "I must consider the implications carefully before proceeding.",
            "One does not simply disregard the established protocols.",
            "It would be most prudent to evaluate all available options.",
        ],
    ),
    (
        "casual",
        [
            "Hey, that's just how things go sometimes, you know?",
            "I'm totally up for whatever comes next!",
            "No big deal, we'll figure it out as we go.",
        ],
    ),
    (
        "stoic",
        [
            "Such is the way of things.",
            "I accept what must be done.",
            "Emotions cloud judgment. Focus on what matters.",
        ],
    ),
    (
        "energetic",
        [
            "Let's go! No time to waste!",
            "I can't WAIT to see what happens next!",
            "This is going to be AMAZING!",
        ],
    ),
    (
        "sarcastic",
        [
            "Oh sure, because THAT always works out well.",
            "Fantastic. Another brilliant plan that can't possibly fail.",
            "What could possibly go wrong? Besides everything.",
        ],
    ),
    (
        "mysterious",
        [
            "There are layers to this you have yet to perceive.",
            "The truth hides in the shadows between words.",
            "Some secrets are best left undiscovered... for now.",
        ],
    ),
];

/// Speaking styles that have their own templates.
pub fn known_styles() -> impl Iterator<Item = &'static str> {
    STYLE_TEMPLATES.iter().map(|(style, _)| *style)
}

/// Three lines of sample dialogue in `speaking_style`.
///
/// Matching is case-insensitive; unknown styles fall back to
/// [`FALLBACK_STYLE`].
#[must_use]
pub fn sample_dialogue(speaking_style: &str) -> Vec<String> {
    let wanted = speaking_style.trim();
    STYLE_TEMPLATES
        .iter()
        .find(|(style, _)| style.eq_ignore_ascii_case(wanted))
        .or_else(|| {
            STYLE_TEMPLATES
                .iter()
                .find(|(style, _)| *style == FALLBACK_STYLE)
        })
        .map(|(_, lines)| lines.iter().map(|line| (*line).to_string()).collect())
        .unwrap_or_default()
}
