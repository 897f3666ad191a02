//! Classification of reviewer vote codes.

/// Vote code used when the current user is not a reviewer.
pub const NO_VOTE_CODE: i32 = -1;

/// The current user's review verdict on a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VoteStatus {
    /// No vote cast, or the user is not a reviewer.
    #[default]
    NoVote,
    /// Vote code `10`.
    Approved,
    /// Vote code `5`.
    ApprovedWithSuggestions,
    /// Vote code `-5`.
    WaitingForAuthor,
    /// Vote code `-10`.
    Rejected,
}

impl VoteStatus {
    /// Classifies a service vote code. Unrecognised codes are `NoVote`.
    ///
    /// # Example
    ///
    /// ```
    /// use prboard::dashboard::VoteStatus;
    ///
    /// assert_eq!(VoteStatus::from_code(10), VoteStatus::Approved);
    /// assert_eq!(VoteStatus::from_code(3), VoteStatus::NoVote);
    /// ```
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        match code {
            10 => Self::Approved,
            5 => Self::ApprovedWithSuggestions,
            -5 => Self::WaitingForAuthor,
            -10 => Self::Rejected,
            _ => Self::NoVote,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NoVote => "No Vote",
            Self::Approved => "Approved",
            Self::ApprovedWithSuggestions => "Approved with Suggestions",
            Self::WaitingForAuthor => "Waiting for Author",
            Self::Rejected => "Rejected",
        }
    }

    /// Icon name understood by the host's icon font.
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::NoVote => "CircleRing",
            Self::Approved => "CompletedSolid",
            Self::ApprovedWithSuggestions => "SkypeCircleCheck",
            Self::WaitingForAuthor => "Clock",
            Self::Rejected => "StatusErrorFull",
        }
    }
}
