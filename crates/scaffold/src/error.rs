use std::borrow::Cow;

/// Errors that abort a scaffolding operation.
///
/// Name collisions on create and a missing module directory on delete are not
/// errors; they are reported as step statuses in [`crate::OperationOutcome`].
#[derive(Debug, thiserror::Error)]
pub enum ScaffoldError {
    /// The module name cannot be used at all (e.g. it is empty).
    #[error("Invalid module name{}: {message}", format_context(.context))]
    InvalidName { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Any filesystem failure. Always fatal for the running operation.
    #[error("I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    /// The configuration file or environment overrides could not be loaded.
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },

    /// A registry file does not have the shape required to edit it.
    #[error("Malformed registry{}: {message}", format_context(.context))]
    MalformedRegistry { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Another invocation currently holds the project lock.
    #[error("Project is locked{}: {message}", format_context(.context))]
    Locked { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal scaffold error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

/// Adds `.context(..)` to results that can be turned into a [`ScaffoldError`].
pub trait ScaffoldErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, ScaffoldError>;
}

impl<T> ScaffoldErrorExt<T> for Result<T, ScaffoldError> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            match &mut e {
                ScaffoldError::InvalidName { context: c, .. }
                | ScaffoldError::Io { context: c, .. }
                | ScaffoldError::Config { context: c, .. }
                | ScaffoldError::MalformedRegistry { context: c, .. }
                | ScaffoldError::Locked { context: c, .. }
                | ScaffoldError::Internal { context: c, .. } => *c = Some(context.into()),
            }
            e
        })
    }
}

impl<T> ScaffoldErrorExt<T> for Result<T, std::io::Error> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, ScaffoldError> {
        self.map_err(|source| ScaffoldError::Io { source, context: Some(context.into()) })
    }
}

impl<T> ScaffoldErrorExt<T> for Result<T, config::ConfigError> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, ScaffoldError> {
        self.map_err(|source| ScaffoldError::Config { source, context: Some(context.into()) })
    }
}

impl From<std::io::Error> for ScaffoldError {
    #[inline]
    fn from(source: std::io::Error) -> Self {
        Self::Io { source, context: None }
    }
}

impl From<config::ConfigError> for ScaffoldError {
    #[inline]
    fn from(source: config::ConfigError) -> Self {
        Self::Config { source, context: None }
    }
}

impl From<&'static str> for ScaffoldError {
    #[inline]
    fn from(s: &'static str) -> Self {
        Self::Internal { message: Cow::Borrowed(s), context: None }
    }
}

impl From<String> for ScaffoldError {
    #[inline]
    fn from(s: String) -> Self {
        Self::Internal { message: Cow::Owned(s), context: None }
    }
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
