//! # Character Profile
//!
//! The record edited by the form, rendered by the summary card and persisted
//! by the profile store.
//!
//! JSON field names are camelCase. Every field has a default, so a partial
//! JSON object deserializes with the missing fields backfilled.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// CONSTANTS
// =============================================================================

/// Number of keyword slots in a fresh profile.
pub const KEYWORD_SLOTS: usize = 5;

/// Age of a fresh profile.
pub const DEFAULT_AGE: u32 = 25;

/// Speaking style of a fresh profile.
pub const DEFAULT_SPEAKING_STYLE: &str = "Casual";

// =============================================================================
// CLOSED ENUMERATIONS
// =============================================================================

/// A string did not name any member of a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

/// Declares a closed enumeration with its canonical labels.
///
/// The label is both the JSON spelling and the display form. Parsing is
/// case-insensitive.
macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) default $default:ident {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every member, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Canonical label.
            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|member| member.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| ParseEnumError {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

closed_enum! {
    /// Character gender.
    Gender("gender") default Other {
        Male => "Male",
        Female => "Female",
        Other => "Other",
    }
}

closed_enum! {
    /// Character race.
    Race("race") default Human {
        Human => "Human",
        Elf => "Elf",
        Dwarf => "Dwarf",
        Orc => "Orc",
        Android => "Android",
        Alien => "Alien",
        Other => "Other",
    }
}

closed_enum! {
    /// Character profession.
    Profession("profession") default Other {
        Warrior => "Warrior",
        Mage => "Mage",
        Rogue => "Rogue",
        Healer => "Healer",
        Merchant => "Merchant",
        Noble => "Noble",
        Scientist => "Scientist",
        Engineer => "Engineer",
        Soldier => "Soldier",
        Pilot => "Pilot",
        Other => "Other",
    }
}

closed_enum! {
    /// Voice used when the character speaks.
    ///
    /// The upper-case members came later and keep their upper-case JSON
    /// spelling.
    VoiceType("voice type") default Deep {
        Deep => "Deep",
        Melodic => "Melodic",
        Rough => "Rough",
        Soft => "Soft",
        Robotic => "Robotic",
        Ethereal => "Ethereal",
        Commanding => "Commanding",
        Whispering => "Whispering",
        Growling => "Growling",
        Childlike => "Childlike",
        Cheerful => "CHEERFUL",
        Calm => "CALM",
        Professional => "PROFESSIONAL",
        Mysterious => "MYSTERIOUS",
    }
}

closed_enum! {
    /// Overall personality archetype.
    PersonalityType("personality type") default Calm {
        Cheerful => "CHEERFUL",
        Calm => "CALM",
        Enigmatic => "ENIGMATIC",
        Professional => "PROFESSIONAL",
        Quirky => "QUIRKY",
        Serious => "SERIOUS",
        Witty => "WITTY",
        Playful => "PLAYFUL",
    }
}

// =============================================================================
// PROFILE KEY
// =============================================================================

/// Identity of a saved profile: its trimmed name.
///
/// Saved profiles have no surrogate key. Two profiles with the same key are
/// the same saved entry, and saving one replaces the other.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProfileKey(String);

impl ProfileKey {
    /// Build the key for a profile name.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(name.trim().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A blank key cannot identify a saved profile.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ProfileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// KEYWORD FIELDS
// =============================================================================

/// The two slot-based keyword lists of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordField {
    Appearance,
    Personality,
}

impl KeywordField {
    fn label(self) -> &'static str {
        match self {
            KeywordField::Appearance => "Appearance keyword",
            KeywordField::Personality => "Personality keyword",
        }
    }
}

// =============================================================================
// CHARACTER PROFILE
// =============================================================================

/// A character record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CharacterProfile {
    // Basic information
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub race: Race,
    pub profession: Profession,
    pub appearance_keywords: Vec<String>,

    // Background
    pub birthplace: String,
    pub faith: String,
    pub childhood_experience: String,
    /// Current position, goals or conflicts.
    pub current_standing: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    // Personality and behaviour
    pub personality_keywords: Vec<String>,
    pub speaking_style: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personality: Option<PersonalityType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_pattern: Option<String>,

    // Skills and abilities
    pub combat_abilities: String,
    pub special_skills: String,
    pub social_skills: String,

    // Generated content
    pub avatar_url: Option<String>,
    pub voice_type: VoiceType,
    pub character_description: String,
    #[serde(alias = "sampleDialogues")]
    pub sample_dialogue: Vec<String>,
}

impl Default for CharacterProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: DEFAULT_AGE,
            gender: Gender::default(),
            race: Race::default(),
            profession: Profession::default(),
            appearance_keywords: vec![String::new(); KEYWORD_SLOTS],
            birthplace: String::new(),
            faith: String::new(),
            childhood_experience: String::new(),
            current_standing: String::new(),
            background: None,
            personality_keywords: vec![String::new(); KEYWORD_SLOTS],
            speaking_style: DEFAULT_SPEAKING_STYLE.to_string(),
            personality: None,
            speech_pattern: None,
            combat_abilities: String::new(),
            special_skills: String::new(),
            social_skills: String::new(),
            avatar_url: None,
            voice_type: VoiceType::default(),
            character_description: String::new(),
            sample_dialogue: Vec::new(),
        }
    }
}

impl CharacterProfile {
    /// A default profile with the given name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Storage identity of this profile.
    #[must_use]
    pub fn key(&self) -> ProfileKey {
        ProfileKey::new(&self.name)
    }

    /// Whether the name is non-blank.
    #[must_use]
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Non-blank appearance keywords, trimmed, in slot order.
    #[must_use]
    pub fn appearance(&self) -> Vec<&str> {
        filled_keywords(&self.appearance_keywords)
    }

    /// Non-blank personality keywords, trimmed, in slot order.
    #[must_use]
    pub fn traits(&self) -> Vec<&str> {
        filled_keywords(&self.personality_keywords)
    }

    /// Keyword slots of `field`.
    #[must_use]
    pub fn keywords(&self, field: KeywordField) -> &[String] {
        match field {
            KeywordField::Appearance => &self.appearance_keywords,
            KeywordField::Personality => &self.personality_keywords,
        }
    }

    /// Overwrite one keyword slot.
    ///
    /// Slots are fixed: an index past the last slot is rejected rather than
    /// growing the list.
    pub fn set_keyword(
        &mut self,
        field: KeywordField,
        index: usize,
        value: impl Into<String>,
    ) -> Result<(), ValidationError> {
        let slots = match field {
            KeywordField::Appearance => &mut self.appearance_keywords,
            KeywordField::Personality => &mut self.personality_keywords,
        };
        let len = slots.len();
        let slot = slots
            .get_mut(index)
            .ok_or(ValidationError::SlotOutOfRange {
                field: field.label(),
                index,
                slots: len,
            })?;
        *slot = value.into();
        Ok(())
    }

    /// Short "{race} {profession}" line used by saved-profile listings.
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!("{} {}", self.race, self.profession)
    }
}

/// Non-blank entries of a keyword list, trimmed.
pub(crate) fn filled_keywords(keywords: &[String]) -> Vec<&str> {
    keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
