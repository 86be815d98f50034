//! # Description Template
//!
//! Renders a profile as a Markdown character sheet.
//!
//! Sections, in order:
//! - `# {name}` (only for a non-blank name)
//! - `## Overview` (always)
//! - `## Background`, `## Current Situation`, `## Personality`,
//!   `## Abilities` (each only when one of its backing fields is non-blank)
//!
//! Blank and whitespace-only fields count as empty. A section with nothing
//! to say is dropped, heading included.

use crate::profile::CharacterProfile;

/// Subject used in sentences when the profile has no name.
pub const UNNAMED_SUBJECT: &str = "This character";

/// Render the Markdown description of `profile`.
#[must_use]
pub fn describe(profile: &CharacterProfile) -> String {
    let name = non_blank(&profile.name);
    let subject = name.unwrap_or(UNNAMED_SUBJECT);

    let mut blocks = Vec::new();
    if let Some(name) = name {
        blocks.push(format!("# {name}"));
    }
    blocks.push(overview(profile, subject));
    blocks.extend(background(profile));
    blocks.extend(section(
        "Current Situation",
        non_blank(&profile.current_standing).map(str::to_string).into_iter().collect(),
    ));
    blocks.extend(personality(profile, subject));
    blocks.extend(abilities(profile));

    blocks.join("\n\n")
}

fn overview(profile: &CharacterProfile, subject: &str) -> String {
    let mut lines = vec![format!(
        "{subject} is a {}-year-old {} {} {}.",
        profile.age, profile.gender, profile.race, profile.profession
    )];
    let appearance = profile.appearance();
    if !appearance.is_empty() {
        lines.push(format!("They are known for their {}.", appearance.join(", ")));
    }
    heading_block("Overview", &lines)
}

fn background(profile: &CharacterProfile) -> Option<String> {
    let mut lines = Vec::new();
    let origin = match (
        non_blank(&profile.birthplace),
        non_blank(&profile.childhood_experience),
    ) {
        (Some(place), Some(childhood)) => Some(format!("Originally from {place}, {childhood}")),
        (Some(place), None) => Some(format!("Originally from {place}.")),
        (None, Some(childhood)) => Some(childhood.to_string()),
        (None, None) => None,
    };
    lines.extend(origin);
    if let Some(faith) = non_blank(&profile.faith) {
        lines.push(format!("They follow the teachings of {faith}."));
    }
    section("Background", lines)
}

fn personality(profile: &CharacterProfile, subject: &str) -> Option<String> {
    let mut lines = Vec::new();
    let traits = profile.traits();
    if !traits.is_empty() {
        lines.push(format!("{subject} is {}.", traits.join(", ")));
    }
    if let Some(style) = non_blank(&profile.speaking_style) {
        lines.push(format!(
            "They typically speak in a {} manner.",
            style.to_lowercase()
        ));
    }
    section("Personality", lines)
}

fn abilities(profile: &CharacterProfile) -> Option<String> {
    let subsections: Vec<String> = [
        ("Combat", profile.combat_abilities.as_str()),
        ("Special Skills", profile.special_skills.as_str()),
        ("Social Aptitude", profile.social_skills.as_str()),
    ]
    .into_iter()
    .filter_map(|(title, text)| non_blank(text).map(|text| format!("### {title}\n{text}")))
    .collect();

    if subsections.is_empty() {
        None
    } else {
        Some(format!("## Abilities\n{}", subsections.join("\n\n")))
    }
}

/// `## heading` followed by `lines`, or `None` when there are no lines.
fn section(heading: &str, lines: Vec<String>) -> Option<String> {
    if lines.is_empty() {
        None
    } else {
        Some(heading_block(heading, &lines))
    }
}

fn heading_block(heading: &str, lines: &[String]) -> String {
    format!("## {heading}\n{}", lines.join("\n"))
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Gender, Profession, Race};
    use proptest::prelude::*;

    fn headings(markdown: &str) -> Vec<&str> {
        markdown
            .lines()
            .filter(|line| line.starts_with('#'))
            .collect()
    }

    fn full_profile() -> CharacterProfile {
        let mut profile = CharacterProfile::named("Aria Nightshade");
        profile.age = 112;
        profile.gender = Gender::Female;
        profile.race = Race::Elf;
        profile.profession = Profession::Rogue;
        profile.appearance_keywords = vec!["silver hair".into(), "".into(), "masked face".into()];
        profile.birthplace = "Nethervale".into();
        profile.childhood_experience = "Raised by wolves in the wilderness".into();
        profile.faith = "The Void's Whisper".into();
        profile.current_standing = "On a quest to find a legendary artifact".into();
        profile.personality_keywords = vec!["cunning".into(), "loyal".into()];
        profile.speaking_style = "Sarcastic".into();
        profile.combat_abilities = "Stealthy assassin".into();
        profile.special_skills = "Photographic memory".into();
        profile.social_skills = "Master of disguise".into();
        profile
    }

    #[test]
    fn full_profile_renders_every_section() {
        let markdown = describe(&full_profile());
        assert_eq!(
            headings(&markdown),
            vec![
                "# Aria Nightshade",
                "## Overview",
                "## Background",
                "## Current Situation",
                "## Personality",
                "## Abilities",
                "### Combat",
                "### Special Skills",
                "### Social Aptitude",
            ]
        );
        assert!(markdown.contains("Aria Nightshade is a 112-year-old Female Elf Rogue."));
        assert!(markdown.contains("They are known for their silver hair, masked face."));
        assert!(
            markdown.contains("Originally from Nethervale, Raised by wolves in the wilderness")
        );
        assert!(markdown.contains("They follow the teachings of The Void's Whisper."));
        assert!(markdown.contains("Aria Nightshade is cunning, loyal."));
        assert!(markdown.contains("They typically speak in a sarcastic manner."));
    }

    #[test]
    fn default_profile_renders_overview_and_style_only() {
        let markdown = describe(&CharacterProfile::default());
        assert_eq!(headings(&markdown), vec!["## Overview", "## Personality"]);
        assert!(markdown.starts_with("## Overview\nThis character is a 25-year-old Other Human Other."));
        assert_eq!(markdown, markdown.trim());
    }

    #[test]
    fn birthplace_without_childhood_ends_sentence() {
        let mut profile = CharacterProfile::named("Kael");
        profile.birthplace = "Arcadia".into();
        let markdown = describe(&profile);
        assert!(markdown.contains("## Background\nOriginally from Arcadia."));
    }

    #[test]
    fn only_filled_ability_subsections_render() {
        let mut profile = CharacterProfile::named("Nova");
        profile.special_skills = "Can create small interdimensional portals".into();
        let markdown = describe(&profile);
        assert!(markdown.contains("## Abilities\n### Special Skills\n"));
        assert!(!markdown.contains("### Combat"));
        assert!(!markdown.contains("### Social Aptitude"));
    }

    fn whitespace() -> impl Strategy<Value = String> {
        "[ \t\n]{0,4}"
    }

    proptest! {
        #[test]
        fn whitespace_fields_never_produce_headings(
            name in whitespace(),
            birthplace in whitespace(),
            faith in whitespace(),
            childhood in whitespace(),
            standing in whitespace(),
            style in whitespace(),
            combat in whitespace(),
            special in whitespace(),
            social in whitespace(),
            keyword in whitespace(),
        ) {
            let mut profile = CharacterProfile::default();
            profile.name = name;
            profile.birthplace = birthplace;
            profile.faith = faith;
            profile.childhood_experience = childhood;
            profile.current_standing = standing;
            profile.speaking_style = style;
            profile.combat_abilities = combat;
            profile.special_skills = special;
            profile.social_skills = social;
            profile.appearance_keywords = vec![keyword.clone(); 5];
            profile.personality_keywords = vec![keyword; 5];

            let markdown = describe(&profile);
            prop_assert_eq!(headings(&markdown), vec!["## Overview"]);
        }

        #[test]
        fn non_blank_standing_always_gets_its_section(standing in "[A-Za-z][A-Za-z ]{0,30}") {
            let mut profile = CharacterProfile::named("Echo");
            profile.current_standing = standing.clone();
            let markdown = describe(&profile);
            let expected = format!("## Current Situation\n{}", standing.trim());
            prop_assert!(markdown.contains(&expected));
        }
    }
}
