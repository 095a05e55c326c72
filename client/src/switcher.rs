use codepad_shared::{LanguageId, LanguageProfile, UnknownLanguageError};

/// Result of a profile switch: the profile to hand the editor surface and,
/// when the buffer still held another profile's placeholder, the
/// replacement text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageSwitch {
    pub profile: &'static LanguageProfile,
    /// New placeholder to install, or None when the user's content is kept.
    pub replacement: Option<&'static str>,
}

/// Maps a selected language to its editor grammar, placeholder document,
/// and executor profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageSwitcher {
    active: LanguageId,
}

impl LanguageSwitcher {
    pub fn new(initial: LanguageId) -> Self {
        Self { active: initial }
    }

    pub fn active(&self) -> LanguageId {
        self.active
    }

    /// Select a profile by id.
    ///
    /// The buffer is replaced with the new profile's placeholder only while
    /// the user has not typed anything of their own, i.e. the current
    /// content still exactly equals another profile's placeholder. Anything
    /// else is the user's work and is never discarded.
    pub fn select(
        &mut self,
        id: &str,
        current_content: &str,
    ) -> Result<LanguageSwitch, UnknownLanguageError> {
        let language: LanguageId = id.parse()?;
        let profile = LanguageProfile::of(language);
        self.active = language;

        let replacement = match LanguageProfile::placeholder_owner(current_content) {
            Some(owner) if owner != language => Some(profile.placeholder),
            _ => None,
        };
        Ok(LanguageSwitch {
            profile,
            replacement,
        })
    }
}
