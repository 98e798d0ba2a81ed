use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use actix_web::{HttpMessage, HttpRequest};
use sea_orm::{DatabaseTransaction, TransactionTrait};
use tokio::time::timeout;

use crate::error::AppError;
use crate::state::app_state::AppState;

/// A shared transaction wrapper that can be injected into request extensions
#[derive(Clone)]
pub struct SharedTxn(pub Arc<DatabaseTransaction>);

impl SharedTxn {
    /// Get a reference to the underlying database transaction
    pub fn transaction(&self) -> &DatabaseTransaction {
        &self.0
    }
}

/// Execute a function within a database transaction.
///
/// 1) If a SharedTxn is in request extensions → use it (no commit/rollback here)
/// 2) Otherwise → begin txn, run closure under the op deadline, commit on Ok /
///    rollback on Err
///
/// The deadline bounds the closure itself, so a store call that hangs turns
/// into a timeout error instead of holding the connection open.
pub async fn with_txn<R, F>(req: Option<&HttpRequest>, state: &AppState, f: F) -> Result<R, AppError>
where
    // Higher-ranked over the transaction borrow so the boxed future may hold
    // it for as long as the closure body runs.
    F: for<'c> FnOnce(
        &'c DatabaseTransaction,
    ) -> Pin<Box<dyn Future<Output = Result<R, AppError>> + 'c>>,
{
    // Extract any SharedTxn out of request extensions *before* awaiting to avoid holding a RefCell borrow.
    let shared_txn: Option<SharedTxn> = if let Some(r) = req {
        r.extensions().get::<SharedTxn>().cloned()
    } else {
        None
    };

    if let Some(shared) = shared_txn {
        return match timeout(state.op_deadline, f(shared.transaction())).await {
            Ok(out) => out,
            Err(_) => Err(AppError::timeout("unit of work exceeded deadline")),
        };
    }

    let db = state.db().ok_or_else(AppError::db_unavailable)?;

    // Real DB path: own the transaction lifecycle
    let txn = db.begin().await?;
    let out = match timeout(state.op_deadline, f(&txn)).await {
        Ok(out) => out,
        Err(_) => Err(AppError::timeout("unit of work exceeded deadline")),
    };

    match out {
        Ok(val) => {
            txn.commit().await?;
            Ok(val)
        }
        Err(err) => {
            // Best-effort rollback; preserve original error
            let _ = txn.rollback().await;
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::db::DbProfile;
    use crate::infra::state::build_state;
    use crate::repos::users;

    #[tokio::test]
    async fn closure_future_may_borrow_the_transaction() {
        let state = build_state()
            .with_db(DbProfile::Test)
            .build()
            .await
            .unwrap();

        // The store call below holds the transaction borrow across its await.
        let found = with_txn(None, &state, |txn| {
            Box::pin(async move {
                users::find_user_by_id(txn, 1)
                    .await
                    .map_err(AppError::from)
            })
        })
        .await
        .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn slow_unit_of_work_times_out() {
        let state = build_state()
            .with_db(DbProfile::Test)
            .build()
            .await
            .unwrap()
            .with_op_deadline(Duration::from_millis(20));

        let result: Result<(), AppError> = with_txn(None, &state, |_txn| {
            Box::pin(async move {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(())
            })
        })
        .await;

        assert!(matches!(result, Err(AppError::Timeout { .. })));
    }

    #[tokio::test]
    async fn missing_db_is_reported_as_unavailable() {
        let state = build_state().build().await.unwrap();

        let result: Result<(), AppError> =
            with_txn(None, &state, |_txn| Box::pin(async move { Ok(()) })).await;

        assert!(matches!(result, Err(AppError::DbUnavailable)));
    }
}
