//! # Random Generators
//!
//! Canned-content generators: every value is a uniform pick from a fixed
//! candidate list. Keyword lists and quote sets are distinct picks (a
//! shuffle-and-take), so one call never repeats an entry.
//!
//! Randomness comes from the injected [`Rng`]; production code uses an
//! entropy-seeded [`StdRng`], tests use a fixed seed.

use crate::description::describe;
use crate::profile::{CharacterProfile, Gender, Profession, Race, VoiceType};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

// =============================================================================
// CANDIDATE LISTS
// =============================================================================

/// Youngest age a random character can have.
pub const MIN_RANDOM_AGE: u32 = 18;

/// Oldest age a random character can have (inclusive).
pub const MAX_RANDOM_AGE: u32 = 499;

/// Appearance keywords per random character.
pub const APPEARANCE_PICKS: usize = 5;

/// Personality keywords per random character.
pub const PERSONALITY_PICKS: usize = 5;

/// Sample dialogue lines per random character.
pub const DIALOGUE_PICKS: usize = 3;

/// Quotes per "random quotes" call.
pub const QUOTE_PICKS: usize = 3;

pub const NAMES: &[&str] = &[
    "Aria Nightshade",
    "Thorne Blackwood",
    "Lyra Stardust",
    "Zephyr Steelsong",
    "Echo Moonshadow",
    "Orion Flametongue",
    "Nova Frostbane",
    "Kael Stormbringer",
    "Seraphina Whisperwind",
    "Draven Ironheart",
    "Celeste Dawnbreaker",
    "Vex Shadowwalker",
];

pub const APPEARANCE_OPTIONS: &[&str] = &[
    "silver hair",
    "golden eyes",
    "scarred face",
    "tattooed arms",
    "mechanical limb",
    "glowing runes",
    "pointed ears",
    "scaled skin",
    "tall and slender",
    "short and stocky",
    "hooded figure",
    "masked face",
    "ethereal glow",
    "dark aura",
    "gem-embedded skin",
];

pub const BIRTHPLACES: &[&str] = &[
    "Arcadia",
    "Elysium Fields",
    "The Floating Cities",
    "The Underdark",
    "Celestial Spires",
    "The Iron Kingdoms",
    "Nethervale",
    "The Crystal Forest",
    "Neo Tokyo",
    "The Wasteland",
    "The Cloud Citadel",
    "The Bottomless Sea",
];

pub const FAITHS: &[&str] = &[
    "The Eternal Light",
    "The Ancient Ones",
    "The Code of Steel",
    "The Void's Whisper",
    "The Digital Consciousness",
    "The Elemental Balance",
    "None (Atheist)",
    "The Universal Song",
    "The Blood Moon Covenant",
    "The Techno-Organic Symbiosis",
    "The Celestial Order",
];

pub const CHILDHOODS: &[&str] = &[
    "Raised by wolves in the wilderness",
    "Trained from birth in a secret academy",
    "Orphaned during the Great War",
    "Grew up in luxury but felt trapped",
    "Lived as a street urchin, surviving by wit alone",
    "Raised in a monastery, studying ancient texts",
    "Experimented on as a child, gaining unusual powers",
    "Born into slavery, fought for freedom",
    "Child prodigy, educated by the realm's finest scholars",
];

pub const STANDINGS: &[&str] = &[
    "Seeking revenge against those who destroyed their homeland",
    "On a quest to find a legendary artifact",
    "Hiding from authorities for a crime they didn't commit",
    "Leading a rebellion against the tyrannical empire",
    "Searching for a cure to a mysterious illness",
    "Working as a mercenary to pay off an enormous debt",
    "Hunting down dangerous monsters that threaten innocent people",
    "Investigating a conspiracy that reaches to the highest powers",
];

pub const PERSONALITY_OPTIONS: &[&str] = &[
    "loyal",
    "cunning",
    "honorable",
    "reckless",
    "calculating",
    "compassionate",
    "vengeful",
    "stoic",
    "curious",
    "arrogant",
    "humble",
    "pragmatic",
    "idealistic",
    "mysterious",
    "charismatic",
];

pub const SPEAKING_STYLES: &[&str] = &[
    "Formal",
    "Casual",
    "Stoic",
    "Energetic",
    "Sarcastic",
    "Mysterious",
    "Robotic",
    "Poetic",
    "Aggressive",
    "Timid",
];

pub const COMBAT_ABILITIES: &[&str] = &[
    "Master swordsman with lightning-fast reflexes",
    "Powerful elemental mage specializing in fire magic",
    "Stealthy assassin proficient with poisons and daggers",
    "Techno-organic enhancements granting superhuman strength",
    "Psionic powers allowing mind control and telekinesis",
    "Expert marksman with modified energy weapons",
    "Martial artist who can harness their inner chi energy",
    "Necromancer commanding an army of undead servants",
];

pub const SPECIAL_SKILLS: &[&str] = &[
    "Can communicate with animals and plants",
    "Photographic memory and rapid learning capabilities",
    "Can manipulate technology with a touch",
    "Has prophetic visions of possible futures",
    "Can create small interdimensional portals",
    "Immune to most poisons and diseases",
    "Can temporarily copy the abilities of others",
    "Skilled craftsman able to forge magical items",
];

pub const SOCIAL_SKILLS: &[&str] = &[
    "Silver-tongued negotiator who can talk their way out of anything",
    "Intimidating presence that makes others comply through fear",
    "Empathic abilities to sense others' emotions and desires",
    "Master of disguise who can blend into any social situation",
    "Charismatic leader who inspires loyalty and devotion",
    "Expert at reading body language and detecting lies",
    "Manipulative schemer who plays people against each other",
    "Networking genius with contacts in every level of society",
];

pub const DIALOGUE_OPTIONS: &[&str] = &[
    "I walk my own path, regardless of what destiny may claim.",
    "In the shadows lies truth that the light refuses to reveal.",
    "Honor isn't what others bestow upon you; it's what you demand of yourself.",
    "The difference between the impossible and possible lies in determination.",
    "Sometimes survival requires becoming what you once despised.",
    "Power without wisdom is the quickest path to destruction.",
    "I've seen worlds rise and fall. Your threats mean nothing to me.",
    "Trust is a luxury I can no longer afford.",
    "We are all just stars waiting for our moment to shine.",
    "The code is absolute. I will not compromise, even in death.",
];

pub const MYSTERIOUS_BACKGROUNDS: &[&str] = &[
    "Hidden royalty in exile, unaware of their true heritage.",
    "The last survivor of an ancient civilization with forgotten knowledge.",
    "Cursed by a deity to wander eternally, seeking redemption.",
    "A clone who gained sentience and escaped the laboratory.",
    "Possessed by a benevolent spirit that grants unusual powers.",
    "Raised by creatures of another species, struggling to fit into either world.",
    "Involved in a secret organization that controls world events.",
    "The reincarnation of a historical figure with fragmented memories.",
    "Unwillingly bonded to an extraplanar entity seeking to experience mortal life.",
    "The product of a forbidden magical/scientific experiment.",
];

pub const QUOTES: &[&str] = &[
    "The shadows whisper secrets to those patient enough to listen.",
    "In a world of masks, the honest face becomes the greatest deception.",
    "I've seen too much to believe in coincidence anymore.",
    "My mercy has its limits, and you've been testing them for quite some time.",
    "Some wounds don't heal. They just stop bleeding.",
    "Trust is a currency I rarely spend.",
    "We make choices in the dark and live with them in the light.",
    "Fear is wisdom in the face of danger, not cowardice.",
    "I may walk with demons, but that doesn't mean I serve them.",
    "The difference between a hero and villain? Usually just who's telling the story.",
];

// =============================================================================
// PROFILE GENERATOR
// =============================================================================

/// Random content generator over the fixed candidate lists.
#[derive(Debug, Clone)]
pub struct ProfileGenerator<R = StdRng> {
    rng: R,
}

impl ProfileGenerator<StdRng> {
    /// Generator seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for ProfileGenerator<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: Rng> ProfileGenerator<R> {
    /// Generator drawing from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// A fully random character, description included.
    pub fn profile(&mut self) -> CharacterProfile {
        let rng = &mut self.rng;
        let mut profile = CharacterProfile {
            name: pick(rng, NAMES),
            age: rng.gen_range(MIN_RANDOM_AGE..=MAX_RANDOM_AGE),
            gender: pick_member(rng, Gender::ALL),
            race: pick_member(rng, Race::ALL),
            profession: pick_member(rng, Profession::ALL),
            appearance_keywords: pick_distinct(rng, APPEARANCE_OPTIONS, APPEARANCE_PICKS),
            birthplace: pick(rng, BIRTHPLACES),
            faith: pick(rng, FAITHS),
            childhood_experience: pick(rng, CHILDHOODS),
            current_standing: pick(rng, STANDINGS),
            personality_keywords: pick_distinct(rng, PERSONALITY_OPTIONS, PERSONALITY_PICKS),
            speaking_style: pick(rng, SPEAKING_STYLES),
            combat_abilities: pick(rng, COMBAT_ABILITIES),
            special_skills: pick(rng, SPECIAL_SKILLS),
            social_skills: pick(rng, SOCIAL_SKILLS),
            avatar_url: None,
            voice_type: pick_member(rng, VoiceType::ALL),
            sample_dialogue: pick_distinct(rng, DIALOGUE_OPTIONS, DIALOGUE_PICKS),
            ..CharacterProfile::default()
        };
        profile.character_description = describe(&profile);
        profile
    }

    /// One mysterious background blurb.
    pub fn background(&mut self) -> String {
        pick(&mut self.rng, MYSTERIOUS_BACKGROUNDS)
    }

    /// [`QUOTE_PICKS`] distinct quotes.
    pub fn quotes(&mut self) -> Vec<String> {
        pick_distinct(&mut self.rng, QUOTES, QUOTE_PICKS)
    }

    /// Replace `profile.current_standing` with a background blurb.
    pub fn apply_background(&mut self, profile: &mut CharacterProfile) {
        profile.current_standing = self.background();
    }

    /// Replace `profile.sample_dialogue` with fresh quotes.
    pub fn apply_quotes(&mut self, profile: &mut CharacterProfile) {
        profile.sample_dialogue = self.quotes();
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, options: &[&str]) -> String {
    options
        .choose(rng)
        .map(|option| (*option).to_string())
        .unwrap_or_default()
}

fn pick_member<R: Rng + ?Sized, T: Copy + Default>(rng: &mut R, members: &[T]) -> T {
    members.choose(rng).copied().unwrap_or_default()
}

fn pick_distinct<R: Rng + ?Sized>(rng: &mut R, options: &[&str], count: usize) -> Vec<String> {
    options
        .choose_multiple(rng, count)
        .map(|option| (*option).to_string())
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
