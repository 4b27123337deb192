use dart_lens::domain::session::{LOGIN_PATH, RouteAccess, SessionState, route_access};
use dart_lens::presentation::routes::NavItem;
use strum::IntoEnumIterator;

#[test]
fn home_matches_only_the_root() {
    assert!(NavItem::Home.is_active("/"));
    assert!(!NavItem::Home.is_active("/dashboard"));
    assert!(NavItem::Dashboard.is_active("/dashboard"));
    assert!(NavItem::Dashboard.is_active("/dashboard/extra"));
    assert!(!NavItem::Info.is_active("/dashboard"));
}

#[test]
fn icons_follow_the_active_state() {
    assert_eq!(NavItem::Dashboard.image(true), "/dashboard_SEL.png");
    assert_eq!(NavItem::Info.image(false), "/info_BTN.png");
    let keys: Vec<&str> = NavItem::iter().map(|n| n.key()).collect();
    assert_eq!(keys, ["home", "dashboard", "info"]);
}

#[test]
fn guard_waits_for_the_first_probe() {
    assert_eq!(route_access(&SessionState::default()), RouteAccess::Pending);
    assert_eq!(
        route_access(&SessionState {
            user: None,
            ready: true,
        }),
        RouteAccess::Redirect(LOGIN_PATH)
    );
}
