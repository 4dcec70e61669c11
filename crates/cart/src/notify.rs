//! User-facing notifications.
//!
//! Every cart mutation surfaces exactly one notice: an informational one
//! on a successful add, or one of the error categories. The sink is
//! injected so a UI can render toasts while tests record notices.

use std::sync::{Arc, Mutex, PoisonError};

/// Feedback categories surfaced to the shopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// A product was added to the cart.
    ProductAdded,
    /// Adding a product failed for a reason other than stock.
    AddFailed,
    /// Removing a product failed.
    RemoveFailed,
    /// Updating a product's quantity failed for a reason other than stock.
    UpdateFailed,
    /// The requested quantity exceeds the available stock.
    OutOfStock,
}

impl Notice {
    /// The message shown to the shopper.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ProductAdded => "Product added to cart successfully",
            Self::AddFailed => "Failed to add product to cart",
            Self::RemoveFailed => "Failed to remove product from cart",
            Self::UpdateFailed => "Failed to update product amount",
            Self::OutOfStock => "Requested quantity is out of stock",
        }
    }

    /// Whether this notice reports a failure.
    #[must_use]
    pub const fn is_error(self) -> bool {
        !matches!(self, Self::ProductAdded)
    }
}

/// Receiver of user-facing notices.
pub trait NotificationSink {
    /// Surface a notice to the shopper.
    fn notify(&self, notice: Notice);
}

/// Sink that surfaces notices as `tracing` events.
///
/// The default sink for headless use; UIs provide their own.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notice: Notice) {
        if notice.is_error() {
            tracing::error!(notice = ?notice, "{}", notice.message());
        } else {
            tracing::info!(notice = ?notice, "{}", notice.message());
        }
    }
}

/// Sink that records notices for inspection in tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices received so far, in order.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent notice, if any.
    #[must_use]
    pub fn last(&self) -> Option<Notice> {
        self.notices().last().copied()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}
