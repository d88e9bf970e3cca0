use thiserror::Error;

/// Error kinds surfaced by queries and by relationship parsing. An
/// unreachable target is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A query referenced a name that no declaration ever introduced.
    #[error("unknown member '{0}'")]
    UnknownMember(String),

    /// A relationship descriptor outside the recognized vocabulary.
    #[error("unrecognized relationship '{0}'")]
    UnknownRelation(String),

    /// A cousin descriptor whose degree or removal count is not a number,
    /// or is too large for the weight formula.
    #[error("bad count '{token}' in relationship '{relation}'")]
    BadDegree { relation: String, token: String },
}
