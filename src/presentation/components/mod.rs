pub mod form;
pub mod insight_cards;
pub mod sidebar;
pub mod sparkline;
pub mod toasts;
pub mod topbar;
pub mod wishlist;
