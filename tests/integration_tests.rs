// Integration tests - the submit workflow across register, store, and printer

use receipt_order::catalog;
use receipt_order::error::{PrintError, StorageError, SubmitError, ValidationError};
use receipt_order::persistence::{OrderId, OrderStore, SqliteStore};
use receipt_order::printer::ReceiptPrinter;
use receipt_order::register::Entry;
use receipt_order::search;
use receipt_order::session::{OrderMeta, OrderStatus, Session};

/// Printer fake capturing output, with a switchable failure.
struct MemPrinter {
    printed: Vec<String>,
    fail: bool,
}

impl MemPrinter {
    fn new() -> Self {
        Self {
            printed: Vec::new(),
            fail: false,
        }
    }
}

impl ReceiptPrinter for MemPrinter {
    fn print(&mut self, text: &str) -> Result<(), PrintError> {
        if self.fail {
            return Err(PrintError("paper jam".to_string()));
        }
        self.printed.push(text.to_string());
        Ok(())
    }
}

/// Store fake recording calls instead of hitting SQLite.
struct RecordingStore {
    next_id: i64,
    saves: usize,
    statuses: Vec<(i64, &'static str)>,
    fail_save: bool,
}

impl RecordingStore {
    fn new() -> Self {
        Self {
            next_id: 0,
            saves: 0,
            statuses: Vec::new(),
            fail_save: false,
        }
    }
}

impl OrderStore for RecordingStore {
    fn save(&mut self, _meta: &OrderMeta, _entries: &[Entry]) -> Result<OrderId, StorageError> {
        if self.fail_save {
            return Err(StorageError("disk full".to_string()));
        }
        self.saves += 1;
        self.next_id += 1;
        Ok(OrderId(self.next_id))
    }

    fn set_status(&mut self, order: OrderId, status: OrderStatus) -> Result<(), StorageError> {
        self.statuses.push((order.0, status.as_str()));
        Ok(())
    }
}

fn session_with(dish_ids: &[&str]) -> Session {
    let mut session = Session::new(32);
    for id in dish_ids {
        session.register.register_dish(catalog::dish(id).unwrap());
    }
    session
}

#[test]
fn test_submit_success_prints_and_clears() {
    let mut session = session_with(&["original_ramyun", "beef_gimbap"]);
    let mut store = SqliteStore::in_memory().unwrap();
    let mut printer = MemPrinter::new();
    let meta = OrderMeta {
        order_number: 7,
        not_paid: false,
    };

    let order_id = session.submit(&meta, &mut store, &mut printer).unwrap();
    assert!(order_id.0 > 0);
    assert_eq!(printer.printed.len(), 1);
    let receipt = &printer.printed[0];
    assert!(receipt.contains("#7"));
    assert!(receipt.contains("R-Origi"));
    assert!(receipt.contains("G-Beef"));
    assert!(session.register.is_empty());
    assert!(!session.has_pending_print());
}

#[test]
fn test_out_of_range_order_number_rejected() {
    let mut session = session_with(&["original_ramyun"]);
    let mut store = RecordingStore::new();
    let mut printer = MemPrinter::new();
    let meta = OrderMeta {
        order_number: 1500,
        not_paid: false,
    };

    let err = session.submit(&meta, &mut store, &mut printer).unwrap_err();
    assert_eq!(
        err,
        SubmitError::Validation(ValidationError::OrderNumberOutOfRange(1500))
    );
    // Nothing persisted, nothing printed, ticket unchanged.
    assert_eq!(store.saves, 0);
    assert!(printer.printed.is_empty());
    assert_eq!(session.register.entries().len(), 1);
}

#[test]
fn test_order_number_zero_is_valid_sentinel() {
    let mut session = session_with(&["original_ramyun"]);
    let mut store = RecordingStore::new();
    let mut printer = MemPrinter::new();
    let meta = OrderMeta::default();

    session.submit(&meta, &mut store, &mut printer).unwrap();
    // No header at all for a paid, number-0 order.
    assert!(!printer.printed[0].contains('#'));
}

#[test]
fn test_empty_ticket_rejected() {
    let mut session = Session::new(32);
    let mut store = RecordingStore::new();
    let mut printer = MemPrinter::new();

    let err = session
        .submit(&OrderMeta::default(), &mut store, &mut printer)
        .unwrap_err();
    assert_eq!(err, SubmitError::Validation(ValidationError::EmptyTicket));
    assert_eq!(store.saves, 0);
}

#[test]
fn test_storage_failure_aborts_before_print() {
    let mut session = session_with(&["original_ramyun"]);
    let mut store = RecordingStore::new();
    store.fail_save = true;
    let mut printer = MemPrinter::new();

    let err = session
        .submit(&OrderMeta::default(), &mut store, &mut printer)
        .unwrap_err();
    assert!(matches!(err, SubmitError::Storage(_)));
    assert!(printer.printed.is_empty());
    assert_eq!(session.register.entries().len(), 1);
    assert!(!session.has_pending_print());
}

#[test]
fn test_print_failure_keeps_ticket_and_reuses_identity() {
    let mut session = session_with(&["original_ramyun", "beef_gimbap"]);
    let mut store = RecordingStore::new();
    let mut printer = MemPrinter::new();
    printer.fail = true;
    let meta = OrderMeta {
        order_number: 3,
        not_paid: false,
    };

    let err = session.submit(&meta, &mut store, &mut printer).unwrap_err();
    assert!(matches!(err, SubmitError::Print(_)));
    assert_eq!(store.saves, 1);
    assert_eq!(store.statuses, vec![(1, "PRINT_FAILED")]);
    // Ticket intact for the retry.
    assert_eq!(session.register.entries().len(), 2);
    assert!(session.has_pending_print());

    // Retry with a working printer: same identity, no second save.
    printer.fail = false;
    let order_id = session.submit(&meta, &mut store, &mut printer).unwrap();
    assert_eq!(order_id, OrderId(1));
    assert_eq!(store.saves, 1);
    assert_eq!(store.statuses.last(), Some(&(1, "PRINTED")));
    assert_eq!(printer.printed.len(), 1);
    assert!(printer.printed[0].contains("#3"));
    assert!(session.register.is_empty());
    assert!(!session.has_pending_print());
}

#[test]
fn test_search_to_receipt_flow() {
    let mut session = Session::new(32);
    let results = search::search(catalog::Category::Gimbap, "st");
    let dish = results
        .iter()
        .copied()
        .find(|d| d.id == "spicy_tuna_gimbap")
        .unwrap();
    session.register.register_dish(dish);

    let mut store = SqliteStore::in_memory().unwrap();
    let mut printer = MemPrinter::new();
    session
        .submit(&OrderMeta::default(), &mut store, &mut printer)
        .unwrap();
    assert!(printer.printed[0].contains("G-S.T."));
}

#[test]
fn test_takeaway_receipt_has_bag_section() {
    let mut session = session_with(&["original_ramyun", "rice_side"]);
    session.register.toggle_takeaway_all();
    let mut store = SqliteStore::in_memory().unwrap();
    let mut printer = MemPrinter::new();
    session
        .submit(&OrderMeta::default(), &mut store, &mut printer)
        .unwrap();
    let receipt = &printer.printed[0];
    assert!(receipt.contains("=== BAG ==="));
    // Sides still render in their separated section.
    assert!(receipt.contains('─'));
}
