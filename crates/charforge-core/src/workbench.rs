//! # Workbench
//!
//! The editing session behind the form and the summary card: the profile
//! being edited, every generated profile (newest first), and the last error
//! shown to the user.

use crate::description::describe;
use crate::dialogue::sample_dialogue;
use crate::error::ValidationError;
use crate::generator::ProfileGenerator;
use crate::profile::{CharacterProfile, KeywordField};
use rand::Rng;
use rand::rngs::StdRng;

/// Field label used when generation is attempted without a name.
const NAME_FIELD: &str = "Character name";

/// Finish a profile for display: compute the description and, when the
/// profile has no dialogue yet, fill it from the speaking-style templates.
///
/// Fails when the name is blank.
pub fn generate_profile(profile: CharacterProfile) -> Result<CharacterProfile, ValidationError> {
    if !profile.has_name() {
        return Err(ValidationError::Required { field: NAME_FIELD });
    }
    let mut profile = profile;
    profile.character_description = describe(&profile);
    if profile.sample_dialogue.is_empty() {
        profile.sample_dialogue = sample_dialogue(&profile.speaking_style);
    }
    Ok(profile)
}

/// In-memory editing session.
#[derive(Debug, Clone)]
pub struct Workbench<R = StdRng> {
    current: CharacterProfile,
    history: Vec<CharacterProfile>,
    error: Option<String>,
    generator: ProfileGenerator<R>,
}

impl Workbench<StdRng> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_generator(ProfileGenerator::from_entropy())
    }
}

impl Default for Workbench<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Workbench<R> {
    /// Session with a default profile drawing randomness from `generator`.
    pub fn with_generator(generator: ProfileGenerator<R>) -> Self {
        Self {
            current: CharacterProfile::default(),
            history: Vec::new(),
            error: None,
            generator,
        }
    }

    pub fn current(&self) -> &CharacterProfile {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut CharacterProfile {
        &mut self.current
    }

    /// Generated profiles, newest first.
    pub fn history(&self) -> &[CharacterProfile] {
        &self.history
    }

    /// Message of the last failed action, cleared by the next success.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Apply a form edit to the current profile.
    pub fn edit(&mut self, apply: impl FnOnce(&mut CharacterProfile)) {
        apply(&mut self.current);
    }

    /// Overwrite one keyword slot of the current profile.
    pub fn set_keyword(
        &mut self,
        field: KeywordField,
        index: usize,
        value: impl Into<String>,
    ) -> Result<(), ValidationError> {
        self.current
            .set_keyword(field, index, value)
            .inspect_err(|e| self.error = Some(e.to_string()))
    }

    /// Generate the card for `profile` and make it current.
    ///
    /// On failure the error message is recorded and the session is otherwise
    /// unchanged.
    pub fn generate(
        &mut self,
        profile: CharacterProfile,
    ) -> Result<&CharacterProfile, ValidationError> {
        match generate_profile(profile) {
            Ok(generated) => {
                tracing::debug!(name = %generated.name, "generated character");
                self.history.insert(0, generated.clone());
                self.current = generated;
                self.error = None;
                Ok(&self.current)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Generate from the current profile.
    pub fn generate_current(&mut self) -> Result<&CharacterProfile, ValidationError> {
        self.generate(self.current.clone())
    }

    /// Back to a default profile. History is kept.
    pub fn reset(&mut self) {
        self.current = CharacterProfile::default();
        self.error = None;
    }

    /// Make a saved profile current.
    pub fn load(&mut self, profile: CharacterProfile) {
        self.current = profile;
        self.error = None;
    }

    pub fn apply_random_background(&mut self) {
        self.generator.apply_background(&mut self.current);
    }

    pub fn apply_random_quotes(&mut self) {
        self.generator.apply_quotes(&mut self.current);
    }

    /// Replace the current profile with a fully random one.
    pub fn randomize(&mut self) -> &CharacterProfile {
        self.current = self.generator.profile();
        self.error = None;
        &self.current
    }
}

// =============================================================================
// TESTS
// =============================================================================
