use crate::token::LoadToken;

/// How a `load` call was satisfied.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadOutcome {
    /// The image was cached; the callback already ran in the caller's
    /// context.
    Complete,
    /// A fetch is in flight; the callback runs on the driver task when it
    /// resolves, unless the token is cancelled first.
    Pending(LoadToken),
}

impl LoadOutcome {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// The cancellation token, if the load is still pending.
    #[must_use]
    pub fn token(&self) -> Option<LoadToken> {
        match self {
            Self::Pending(token) => Some(*token),
            Self::Complete => None,
        }
    }
}
