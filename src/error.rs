//! Error type shared by the corpus loader, the prune cache and the search.

/// Errors raised before or during a search.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Word indices must stay below the cache's sentinel values.
    #[error("corpus holds {len} words, at most {max} are supported")]
    CorpusTooLarge { len: usize, max: usize },

    #[error("cannot allocate prune cache of {entries} entries")]
    CacheAllocation { entries: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
