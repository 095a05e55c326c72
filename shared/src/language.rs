use std::fmt;
use std::str::FromStr;

use crate::error::UnknownLanguageError;

/// Identifier of a built-in language profile.
///
/// The set is closed today, but resolution stays total over arbitrary ids:
/// anything outside the set is an [`UnknownLanguageError`], never a panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageId {
    Python,
    Javascript,
}

impl LanguageId {
    pub const ALL: [LanguageId; 2] = [LanguageId::Python, LanguageId::Javascript];

    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageId::Python => "python",
            LanguageId::Javascript => "javascript",
        }
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageId {
    type Err = UnknownLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "python" => Ok(LanguageId::Python),
            "javascript" => Ok(LanguageId::Javascript),
            other => Err(UnknownLanguageError {
                id: other.to_string(),
            }),
        }
    }
}

/// A language profile: the editor grammar and the starter document shown
/// before the user types anything. Executors live in the sandbox crate,
/// keyed by [`LanguageId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageProfile {
    pub id: LanguageId,
    /// File extension the editor surface uses to pick a grammar.
    pub grammar_extension: &'static str,
    /// Starter text for a pristine buffer.
    pub placeholder: &'static str,
}

static PROFILES: [LanguageProfile; 2] = [
    LanguageProfile {
        id: LanguageId::Python,
        grammar_extension: "py",
        placeholder: "# Write your Python code here\nprint('Hello, World!')",
    },
    LanguageProfile {
        id: LanguageId::Javascript,
        grammar_extension: "js",
        placeholder: "// Write your JavaScript code here\nconsole.log('Hello, World!');",
    },
];

impl LanguageProfile {
    pub fn of(id: LanguageId) -> &'static LanguageProfile {
        match id {
            LanguageId::Python => &PROFILES[0],
            LanguageId::Javascript => &PROFILES[1],
        }
    }

    /// Resolve a profile by its string id.
    pub fn lookup(id: &str) -> Result<&'static LanguageProfile, UnknownLanguageError> {
        Ok(Self::of(id.parse()?))
    }

    pub fn all() -> &'static [LanguageProfile] {
        &PROFILES
    }

    /// The profile whose placeholder exactly equals `content`, if any.
    /// Used to decide whether the user has typed anything of their own.
    pub fn placeholder_owner(content: &str) -> Option<LanguageId> {
        PROFILES
            .iter()
            .find(|profile| profile.placeholder == content)
            .map(|profile| profile.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_total() {
        assert_eq!(LanguageProfile::lookup("python").unwrap().id, LanguageId::Python);
        assert_eq!(
            LanguageProfile::lookup("javascript").unwrap().grammar_extension,
            "js"
        );

        let err = LanguageProfile::lookup("ruby").unwrap_err();
        assert_eq!(err.id, "ruby");
    }

    #[test]
    fn placeholder_ownership_is_exact() {
        let python = LanguageProfile::of(LanguageId::Python);
        assert_eq!(
            LanguageProfile::placeholder_owner(python.placeholder),
            Some(LanguageId::Python)
        );
        assert_eq!(LanguageProfile::placeholder_owner("custom text"), None);
        assert_eq!(LanguageProfile::placeholder_owner(""), None);

        // A prefix of a placeholder is already the user's own work.
        let truncated = &python.placeholder[..python.placeholder.len() - 1];
        assert_eq!(LanguageProfile::placeholder_owner(truncated), None);
    }
}
