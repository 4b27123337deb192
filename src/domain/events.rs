use crate::domain::wishlist::CorpCode;
use std::fmt::Debug;

/// Base trait for everything published on the invalidation bus
pub trait DomainEvent: Debug + Clone {
    fn event_type(&self) -> &'static str;
}

/// Signals exchanged between view-models.
///
/// Only [`BusEvent::WishlistInvalidated`] leaves the tab; the other variants
/// concern views mounted in the current document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusEvent {
    /// Cached wishlist rows are stale, refetch the full list
    WishlistInvalidated,
    /// Insight snapshots changed on the backend after a sync
    InsightsInvalidated,
    /// A company was just added and the user wants it synced right away
    AutoSyncRequested { corp_code: CorpCode },
}

/// Message posted on the cross-tab channel for a wishlist invalidation.
pub const WIRE_INVALIDATE: &str = "invalidate";

impl BusEvent {
    pub fn crosses_tabs(&self) -> bool {
        matches!(self, BusEvent::WishlistInvalidated)
    }

    pub fn to_wire(&self) -> Option<&'static str> {
        match self {
            BusEvent::WishlistInvalidated => Some(WIRE_INVALIDATE),
            _ => None,
        }
    }

    /// Unknown messages from other tabs are ignored.
    pub fn from_wire(message: &str) -> Option<Self> {
        match message {
            WIRE_INVALIDATE => Some(BusEvent::WishlistInvalidated),
            _ => None,
        }
    }
}

impl DomainEvent for BusEvent {
    fn event_type(&self) -> &'static str {
        match self {
            BusEvent::WishlistInvalidated => "wishlist:invalidate",
            BusEvent::InsightsInvalidated => "insights:invalidate",
            BusEvent::AutoSyncRequested { .. } => "wishlist:autoSync",
        }
    }
}
