//! Navigation targets and the authentication guard.

use leptos::*;
use leptos_router::*;
use strum::{EnumIter, IntoStaticStr};

use crate::app::AppContext;
use crate::domain::session::{RouteAccess, route_access};

/// Sidebar entries, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum NavItem {
    Home,
    Dashboard,
    Info,
}

impl NavItem {
    pub fn path(&self) -> &'static str {
        match self {
            NavItem::Home => "/",
            NavItem::Dashboard => "/dashboard",
            NavItem::Info => "/info",
        }
    }

    pub fn key(&self) -> &'static str {
        (*self).into()
    }

    /// Home matches only the root; the others match their whole subtree.
    pub fn is_active(&self, pathname: &str) -> bool {
        match self {
            NavItem::Home => pathname == "/",
            _ => pathname.starts_with(self.path()),
        }
    }

    /// `/{key}_SEL.png` when active, `/{key}_BTN.png` otherwise
    pub fn image(&self, active: bool) -> String {
        format!("/{}_{}.png", self.key(), if active { "SEL" } else { "BTN" })
    }
}

/// Renders `children` only for a signed-in session. Nothing is shown until
/// the first session probe finishes; signed-out visitors go to the login
/// page.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let session = ctx.session_state;
    let access = create_memo(move |_| route_access(&session.get()));

    move || match access.get() {
        RouteAccess::Pending => ().into_view(),
        RouteAccess::Redirect(path) => view! { <Redirect path=path /> }.into_view(),
        RouteAccess::Render => children().into_view(),
    }
}
