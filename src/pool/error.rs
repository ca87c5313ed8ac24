/// Errors raised when changing pool state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("week numbers start at 1")]
    InvalidWeek,

    #[error("week {week} has not been recorded")]
    WeekNotFound { week: u32 },

    #[error("week {week} is final and can no longer change")]
    AlreadyFinal { week: u32 },

    #[error("unsupported pool state version: {version}")]
    UnsupportedVersion { version: u32 },
}
