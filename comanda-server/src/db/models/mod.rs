//! Database Models

// Serde helpers
pub mod serde_helpers;

// Reference data
pub mod dining_table;
pub mod employee;
pub mod menu_item;

// Lifecycle
pub mod line_item;
pub mod order;
pub mod sale;

// Re-exports
pub use dining_table::DiningTable;
pub use employee::{Employee, ROLE_WAITER};
pub use line_item::{
    BillableLine, DEFAULT_ANNOTATION, KitchenLine, LineItem, LineItemCreate, LineItemUpdate,
    LineView,
};
pub use menu_item::MenuItem;
pub use order::{
    Order, OrderCreate, OrderCreated, OrderDetail, OrderStateUpdate, OrderSummary, PayableOrder,
};
pub use sale::{
    InvoiceCreate, InvoiceCreated, Sale, SaleDetail, SaleItem, SaleItemDraft, SaleItemRow,
};
