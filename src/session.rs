//! The session controller: owns the active register and drives the submit
//! transaction (persist, then print).
//!
//! Submission policy: the storage write is the sole commit point. A storage
//! failure aborts before anything is rendered to the printer and leaves the
//! ticket untouched. A print failure after a successful save keeps the
//! ticket and the persisted identity; the next submit retries the print
//! against the same order instead of saving a duplicate. The ticket is
//! cleared only after a successful print.

use crate::compose;
use crate::error::{StorageError, SubmitError, ValidationError};
use crate::persistence::{OrderId, OrderStore};
use crate::printer::ReceiptPrinter;
use crate::register::Register;
use crate::render;

/// Inclusive upper bound of the order number domain. 0 is the valid
/// "no number" sentinel, not an error.
pub const MAX_ORDER_NUMBER: u32 = 1000;

/// Session-scoped order metadata. `not_paid` is never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderMeta {
    pub order_number: u32,
    pub not_paid: bool,
}

impl OrderMeta {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.order_number > MAX_ORDER_NUMBER {
            return Err(ValidationError::OrderNumberOutOfRange(self.order_number));
        }
        Ok(())
    }
}

/// Persisted lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Draft,
    Saved,
    Printed,
    PrintFailed,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Draft => "DRAFT",
            OrderStatus::Saved => "SAVED",
            OrderStatus::Printed => "PRINTED",
            OrderStatus::PrintFailed => "PRINT_FAILED",
        }
    }
}

/// A saved order whose print attempt failed, kept for retry.
#[derive(Debug, Clone)]
struct PendingPrint {
    order_id: OrderId,
    text: String,
}

/// One operator session: the active ticket plus the print-retry slot.
pub struct Session {
    pub register: Register,
    pending: Option<PendingPrint>,
    receipt_width: usize,
}

impl Session {
    pub fn new(receipt_width: usize) -> Self {
        Self {
            register: Register::new(),
            pending: None,
            receipt_width,
        }
    }

    /// True when a saved order is waiting for a print retry.
    pub fn has_pending_print(&self) -> bool {
        self.pending.is_some()
    }

    /// Submit the current ticket: validate, persist in one transaction,
    /// then print. See the module docs for the failure policy.
    pub fn submit(
        &mut self,
        meta: &OrderMeta,
        store: &mut dyn OrderStore,
        printer: &mut dyn ReceiptPrinter,
    ) -> Result<OrderId, SubmitError> {
        if let Some(pending) = self.pending.clone() {
            // Retry path: the order identity already exists, only the print
            // is outstanding.
            tracing::info!(order_id = pending.order_id.0, "retrying failed print");
            printer.print(&pending.text)?;
            self.finish_printed(pending.order_id, store);
            return Ok(pending.order_id);
        }

        meta.validate()?;
        if self.register.is_empty() {
            return Err(ValidationError::EmptyTicket.into());
        }

        let composition = compose::compose(&self.register);
        let text = render::render(&composition, meta, self.receipt_width);

        let order_id = store.save(meta, self.register.entries())?;
        tracing::info!(
            order_id = order_id.0,
            order_number = meta.order_number,
            entries = self.register.entries().len(),
            "order saved"
        );

        if let Err(err) = printer.print(&text) {
            tracing::warn!(order_id = order_id.0, error = %err, "print failed after save");
            if let Err(status_err) = store.set_status(order_id, OrderStatus::PrintFailed) {
                tracing::warn!(order_id = order_id.0, error = %status_err, "status update failed");
            }
            self.pending = Some(PendingPrint { order_id, text });
            return Err(err.into());
        }

        self.finish_printed(order_id, store);
        Ok(order_id)
    }

    /// Mark the order printed and clear the ticket. A status-update failure
    /// at this point is logged, not surfaced: the receipt already printed
    /// and the saved record stays accurate as `SAVED`.
    fn finish_printed(&mut self, order_id: OrderId, store: &mut dyn OrderStore) {
        if let Err(err) = store.set_status(order_id, OrderStatus::Printed) {
            let StorageError(msg) = err;
            tracing::warn!(order_id = order_id.0, error = %msg, "status update failed");
        }
        self.pending = None;
        self.register.clear();
    }
}
