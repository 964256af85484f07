use crate::error::ScaffoldError;
use std::fmt;
use std::ops::Deref;

/// Identifier of a plugin module.
///
/// The same string is used as the module's directory name, as the substitution
/// token in generated sources and as the keyword that identifies the module's
/// registry lines. Only emptiness is rejected; anything else is passed through
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleName(String);

impl ModuleName {
    pub fn new(name: impl Into<String>) -> Result<Self, ScaffoldError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ScaffoldError::InvalidName {
                message: "Module name cannot be empty".into(),
                context: None,
            });
        }
        Ok(Self(name))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for ModuleName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for ModuleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for ModuleName {
    type Error = ScaffoldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for ModuleName {
    type Error = ScaffoldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
