use thiserror::Error;

#[derive(Debug, Error)]
pub enum WatchError {
    #[error(transparent)]
    Db(#[from] offerwatch_db::DbError),

    #[error("all {failed} queries failed this cycle")]
    AllQueriesFailed { failed: usize },
}
