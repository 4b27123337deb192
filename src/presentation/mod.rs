//! Leptos components: shell, route guard, pages.

pub mod components;
pub mod hooks;
pub mod pages;
pub mod routes;
