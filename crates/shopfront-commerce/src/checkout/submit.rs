//! Order submission against an order store.

use crate::checkout::OrderSubmission;
use crate::error::CommerceError;
use crate::ids::OrderId;
use crate::store::OrderStore;
use tracing::{debug, error};

/// Persist the order header, then its items.
///
/// A rejected header is a plain [`CommerceError::Submission`] and no items
/// are written. If the header is stored but the items are not, the header
/// stays in the store and [`CommerceError::PartialPersistence`] names it.
pub async fn submit_order<S>(store: &S, submission: &OrderSubmission) -> Result<OrderId, CommerceError>
where
    S: OrderStore + ?Sized,
{
    let order_number = &submission.order.order_number;

    let stored = store.insert_order(&submission.order).await.map_err(|e| {
        error!(%order_number, error = %e, "failed to store order header");
        CommerceError::from(e)
    })?;
    debug!(%order_number, order_id = %stored.id, "order header stored");

    if let Err(e) = store.insert_order_items(&stored.id, &submission.items).await {
        error!(
            %order_number,
            order_id = %stored.id,
            error = %e,
            "order header stored without its items"
        );
        return Err(CommerceError::PartialPersistence {
            order_id: stored.id.to_string(),
            reason: e.to_string(),
        });
    }

    debug!(%order_number, items = submission.items.len(), "order items stored");
    Ok(stored.id)
}
