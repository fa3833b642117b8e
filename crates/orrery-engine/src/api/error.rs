//! Orrery error types.

use crate::core::body::BodyKind;

/// Why a body definition was rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DefinitionFault {
    #[error("radius must be positive and finite, got {0}")]
    BadRadius(f64),

    #[error("orbital period must be non-negative and finite, got {0}")]
    BadOrbitalPeriod(f64),

    #[error("rotation period must be finite, got {0}")]
    BadRotationPeriod(f64),

    #[error("axial tilt must be finite, got {0}")]
    BadTilt(f64),

    #[error("distance from parent must be non-negative and finite, got {0}")]
    BadDistance(f64),

    #[error("name is already taken by another body")]
    DuplicateName,

    #[error("roster has no star")]
    MissingStar,

    #[error("roster has more than one star")]
    MultipleStars,

    #[error("the star cannot have a parent")]
    StarWithParent,

    #[error("the star cannot orbit or sit away from the origin")]
    StarInMotion,

    #[error("{0:?} needs a parent to orbit")]
    MissingParent(BodyKind),

    #[error("parent `{0}` is not in the roster")]
    UnknownParent(String),

    #[error("a {child:?} cannot orbit a {parent:?}")]
    ParentKindMismatch { child: BodyKind, parent: BodyKind },
}

/// Errors surfaced by the orrery core.
#[derive(Debug, thiserror::Error)]
pub enum OrreryError {
    /// The roster could not be built. Nothing is partially constructed.
    #[error("invalid body definition `{name}`: {fault}")]
    InvalidBodyDefinition {
        name: String,
        #[source]
        fault: DefinitionFault,
    },

    /// A focus request named a body that is not in the tree.
    #[error("unknown focus target `{0}`")]
    FocusUnknownTarget(String),

    /// Malformed JSON configuration.
    #[error("failed to parse orrery config: {0}")]
    Config(#[from] serde_json::Error),
}

impl OrreryError {
    pub(crate) fn invalid(name: &str, fault: DefinitionFault) -> Self {
        OrreryError::InvalidBodyDefinition {
            name: name.to_owned(),
            fault,
        }
    }

    /// The fault behind an `InvalidBodyDefinition`, if that is what this is.
    pub fn definition_fault(&self) -> Option<&DefinitionFault> {
        match self {
            OrreryError::InvalidBodyDefinition { fault, .. } => Some(fault),
            _ => None,
        }
    }
}
