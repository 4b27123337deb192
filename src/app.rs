use leptos::*;
use leptos_router::*;
use std::rc::Rc;

use crate::{
    application::{
        Spawner,
        invalidation_bus::InvalidationBus,
        notifications::{NotificationCenter, Notifier},
        selection::SelectionStore,
        session::SessionStore,
        wishlist_flow::FlowContext,
    },
    config::AppConfig,
    domain::{
        logging::LogComponent,
        repositories::KeyValueStore,
        session::SessionState,
        wishlist::CorpCode,
    },
    global_state::globals,
    infrastructure::{
        broadcast::BroadcastChannelTransport,
        http::ApiClient,
        spawn::BrowserSpawner,
        storage::BrowserStorage,
    },
    log_info,
    presentation::{
        components::{
            sidebar::Sidebar,
            toasts::ToastHost,
            topbar::Topbar,
            wishlist::WishlistPanel,
        },
        hooks::watch,
        pages::{
            dashboard::DashboardPage, home::HomePage, info::InfoPage, login::LoginPage,
            signup::SignupPage, wishlist::WishlistPage,
        },
        routes::ProtectedRoute,
    },
};

/// Services shared by every component, provided once at the root
#[derive(Clone)]
pub struct AppContext {
    pub config: Rc<AppConfig>,
    pub api: ApiClient,
    pub bus: InvalidationBus,
    pub notifications: NotificationCenter,
    pub session: SessionStore<ApiClient>,
    pub selection: SelectionStore,
    pub prefs: Rc<dyn KeyValueStore>,
    pub spawner: Spawner,
    pub session_state: ReadSignal<SessionState>,
    pub selected: ReadSignal<Option<CorpCode>>,
}

impl AppContext {
    pub fn notifier(&self) -> Rc<dyn Notifier> {
        Rc::new(self.notifications.clone())
    }

    pub fn flow_context(&self) -> FlowContext {
        FlowContext {
            bus: self.bus.clone(),
            notifier: self.notifier(),
            prefs: Rc::clone(&self.prefs),
            spawner: Rc::clone(&self.spawner),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.session_state.with(SessionState::is_logged_in)
    }
}

fn build_context() -> AppContext {
    let config = AppConfig::default();
    let api = ApiClient::new(&config.api_base);
    let notifications = NotificationCenter::new();
    let notifier: Rc<dyn Notifier> = Rc::new(notifications.clone());
    let session = SessionStore::new(api.clone(), notifier);
    let selection = SelectionStore::new(Rc::new(BrowserStorage::session()));

    let session_state = watch(session.state(), |emit| session.subscribe(emit));
    let selected = watch(selection.selected(), |emit| selection.subscribe(emit));

    AppContext {
        config: Rc::new(config),
        api,
        bus: InvalidationBus::new(),
        notifications,
        session,
        selection,
        prefs: Rc::new(BrowserStorage::local()),
        spawner: Rc::new(BrowserSpawner),
        session_state,
        selected,
    }
}

/// Root component: context, session probe, cross-tab link and routes
#[component]
pub fn App() -> impl IntoView {
    globals();
    let ctx = build_context();
    provide_context(ctx.clone());

    {
        let session = ctx.session.clone();
        spawn_local(async move { session.refresh().await });
    }

    // Cross-tab invalidation only runs for a signed-in session.
    let session_state = ctx.session_state;
    let logged_in = create_memo(move |_| session_state.with(SessionState::is_logged_in));
    {
        let bus = ctx.bus.clone();
        let channel = ctx.config.broadcast_channel;
        create_effect(move |_| {
            if logged_in.get() {
                if !bus.is_cross_tab_connected() {
                    bus.connect_cross_tab(|inbound| BroadcastChannelTransport::open(channel, inbound));
                }
            } else {
                bus.disconnect_cross_tab();
            }
        });
    }

    log_info!(LogComponent::Presentation("App"), "DART:Lens mounted");

    view! {
        <style>
            {r#"
            .panel-surface {
                height: 100%;
                display: flex;
                flex-direction: column;
                min-height: 0;
                border-radius: 0.5rem;
                padding: 1rem;
            }

            .card-surface,
            .card-surface-lg,
            .card-outline {
                border: 1px solid #e5e7eb;
                border-radius: 0.375rem;
                background: #ffffff;
                padding: 0.75rem;
            }

            .card-surface-lg {
                padding: 1rem;
            }

            .list-bullet {
                list-style: disc;
                padding-left: 1.25rem;
                font-size: 0.875rem;
                color: #374151;
            }

            .input-base {
                width: 100%;
                border: 1px solid #d1d5db;
                border-radius: 0.375rem;
                padding: 0.5rem 0.75rem;
                font-size: 0.875rem;
                outline: none;
            }

            .img-interactive {
                transition: transform 150ms;
            }

            .img-interactive:hover {
                transform: scale(1.05);
                filter: brightness(1.1);
            }

            .toast-host {
                position: fixed;
                right: 1rem;
                bottom: 1rem;
                z-index: 60;
                display: flex;
                flex-direction: column;
                gap: 0.5rem;
                max-width: 22rem;
            }
            "#}
        </style>
        <Router>
            <Routes>
                <Route path="/" view=AppShell>
                    <Route path="" view=HomePage/>
                    <Route
                        path="dashboard"
                        view=|| view! { <ProtectedRoute><DashboardPage/></ProtectedRoute> }
                    />
                    <Route
                        path="info"
                        view=|| view! { <ProtectedRoute><InfoPage/></ProtectedRoute> }
                    />
                    <Route
                        path="wishlist"
                        view=|| view! { <ProtectedRoute><WishlistPage/></ProtectedRoute> }
                    />
                    <Route path="*any" view=HomePage/>
                </Route>
                <Route path="/signup" view=SignupPage/>
                <Route path="/login" view=LoginPage/>
            </Routes>
            <ToastHost/>
        </Router>
    }
}

/// Topbar, sidebar, routed page and the wishlist column
#[component]
fn AppShell() -> impl IntoView {
    view! {
        <div class="min-h-screen w-full bg-gray-50 text-gray-900">
            <Topbar/>
            <div class="mx-auto max-w-[1400px] px-4 pb-8">
                <div class="flex gap-1">
                    <Sidebar/>
                    <main class="flex-1 border rounded-lg bg-white overflow-hidden mt-1">
                        <div class="h-[81vh]">
                            <Outlet/>
                        </div>
                    </main>
                    <WishlistPanel/>
                </div>
            </div>
        </div>
    }
}
