/// Order in which entries with equal priority leave the open set.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TieBreak {
    /// Oldest entry first.
    #[default]
    Fifo,
    /// Newest entry first.
    Lifo,
}

/// What happens when a cell already waiting in the open set is reached
/// through a cheaper route.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Requeue {
    /// Push a second entry under the new key and drop outdated entries when
    /// they are popped.
    #[default]
    Lazy,
    /// Keep the single entry under its old key. Scores and the predecessor
    /// link are still updated, only the queue position lags behind.
    Never,
}

/// Tuning knobs for [`Engine`](crate::Engine).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    pub tie_break: TieBreak,
    pub requeue: Requeue,
}
