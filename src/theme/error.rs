use thiserror::Error;

use crate::theme::ThemeMode;

/// Errors produced while loading, validating or resolving a theme.
#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("unknown theme mode \"{0}\", expected \"light\" or \"dark\"")]
    UnknownMode(String),
    #[error("the theme has no {0} variant")]
    MissingVariant(ThemeMode),
    #[error("the theme defines the {0} variant more than once")]
    DuplicateVariant(ThemeMode),
    #[error("\"{0}\" is not a valid color reference")]
    InvalidColorReference(String),
    #[error("color \"{reference}\" does not exist in the {mode} variant")]
    UnknownColor { reference: String, mode: ThemeMode },
    #[error("no shadow named \"{0}\"")]
    UnknownShadow(String),
    #[error("no corner radius named \"{0}\"")]
    UnknownRadius(String),
    #[error("no spacing step named \"{0}\"")]
    UnknownSpacing(String),
    #[error("no animation named \"{0}\"")]
    UnknownAnimation(String),
    #[error("no keyframes named \"{0}\"")]
    UnknownKeyframes(String),
    #[error("no component style named \"{0}\"")]
    UnknownComponentStyle(String),
    #[error("no backdrop blur named \"{0}\"")]
    UnknownBlur(String),
    #[error("no breakpoint named \"{0}\"")]
    UnknownBreakpoint(String),
    #[error("no z-index layer named \"{0}\"")]
    UnknownZIndex(String),
    #[error("no gradient named \"{0}\"")]
    UnknownGradient(String),
    #[error("no theme has been installed, call `set_theme` before rendering themed components")]
    NotInstalled,
    #[error("could not parse theme: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("could not read theme: {0}")]
    Io(#[from] std::io::Error),
}
