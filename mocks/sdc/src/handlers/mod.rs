//! HTTP handlers of the catalog mock.
//!
//! Mutations go through [`dispatch`], reads take the store's read lock
//! through `Store::state`.

pub mod catalog;
pub mod distribution;
pub mod generic;
pub mod onboarding;

use crate::reducer::{CatalogAction, CatalogCommand, CatalogReply};
use crate::CatalogStore;
use platform_mocks_web::AppError;
use std::time::Duration;
use uuid::Uuid;

/// How long a request waits for its command to be applied.
const COMMAND_TIMEOUT: Duration = Duration::from_secs(10);

/// Send `command` to the store and wait for its outcome.
///
/// # Errors
///
/// The command's rejection, or a store error when the store is shutting
/// down or does not answer in time.
pub async fn dispatch(
    store: &CatalogStore,
    command: CatalogCommand,
) -> Result<CatalogReply, AppError> {
    let request_id = Uuid::new_v4();

    let completed = store
        .send_and_wait_for(
            CatalogAction::Command {
                request_id,
                command,
            },
            move |action| {
                matches!(action, CatalogAction::Completed { request_id: id, .. } if *id == request_id)
            },
            COMMAND_TIMEOUT,
        )
        .await?;

    match completed {
        CatalogAction::Completed { outcome, .. } => outcome.map_err(AppError::from),
        CatalogAction::Command { .. } => Err(unexpected_reply()),
    }
}

/// A command answered with a reply of the wrong kind.
pub(crate) fn unexpected_reply() -> AppError {
    tracing::error!("Command completed with an unexpected reply");
    AppError::internal("Unexpected command reply")
}
