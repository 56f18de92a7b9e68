//! Helpers shared by the SeaORM repositories.

use std::future::Future;
use std::time::Duration;

use models::ids::{self, IdKind};
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{ColumnTrait, DbErr};
use tracing::warn;

use crate::errors::ServiceError;

pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

const ID_ATTEMPTS: u32 = 3;

/// Await one store round trip, failing with [`ServiceError::Store`] once `limit` elapses.
pub async fn run<T, F>(limit: Duration, fut: F) -> Result<T, ServiceError>
where
    F: Future<Output = Result<T, DbErr>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(res) => res.map_err(ServiceError::from),
        Err(_) => {
            warn!(timeout_ms = limit.as_millis() as u64, "store_call_timed_out");
            Err(ServiceError::Store(format!("store call exceeded {}ms", limit.as_millis())))
        }
    }
}

/// Case-insensitive substring match on a column.
pub fn contains_ci<C: ColumnTrait>(col: C, term: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(col.as_column_ref()))).like(format!("%{}%", term.to_lowercase()))
}

/// Insert under a freshly generated identifier of `kind`.
///
/// Identifiers only have millisecond resolution, so a key conflict is
/// retried with a new identifier a couple of times before it is reported.
pub async fn insert_with_id<T, F, Fut>(kind: IdKind, mut insert: F) -> Result<T, ServiceError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<T, ServiceError>>,
{
    let mut attempt = 1;
    loop {
        match insert(ids::generate(kind)).await {
            Err(ServiceError::Conflict(_)) if attempt < ID_ATTEMPTS => {
                warn!(%kind, attempt, "generated_id_collision");
                attempt += 1;
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
            other => return other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn slow_calls_become_store_errors() {
        let res: Result<(), ServiceError> = run(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok(())
        })
        .await;
        assert!(matches!(res, Err(ServiceError::Store(m)) if m.contains("10ms")));
    }

    #[tokio::test]
    async fn db_errors_are_mapped() {
        let res: Result<(), ServiceError> = run(DEFAULT_QUERY_TIMEOUT, async {
            Err(DbErr::RecordNotFound("x".into()))
        })
        .await;
        assert!(matches!(res, Err(ServiceError::Store(_))));
    }

    #[tokio::test]
    async fn id_collisions_are_retried() {
        let mut seen = Vec::new();
        let id = insert_with_id(IdKind::Payment, |id| {
            seen.push(id.clone());
            let first = seen.len() == 1;
            async move {
                if first {
                    Err(ServiceError::Conflict("Resource already exists".into()))
                } else {
                    Ok(id)
                }
            }
        })
        .await
        .unwrap();
        assert_eq!(seen.len(), 2);
        assert!(ids::matches(&id, IdKind::Payment));
    }

    #[tokio::test]
    async fn persistent_conflicts_surface() {
        let res: Result<(), ServiceError> = insert_with_id(IdKind::Package, |_| async {
            Err(ServiceError::Conflict("Resource already exists".into()))
        })
        .await;
        assert!(matches!(res, Err(ServiceError::Conflict(_))));
    }
}
