//! View-models and the coordination between them.
//!
//! Everything here is single-threaded (`Rc`/`RefCell`) and free of browser
//! APIs: HTTP, storage and task spawning come in through traits, which keeps
//! the flows runnable on the host under `futures::executor::LocalPool`.

use std::future::Future;
use std::rc::Rc;

use futures::task::{LocalSpawn, LocalSpawnExt};

use crate::domain::logging::LogComponent;
use crate::log_error;

pub mod insights;
pub mod invalidation_bus;
pub mod listeners;
pub mod notifications;
pub mod search;
pub mod selection;
pub mod session;
pub mod store;
pub mod wishlist_flow;

/// Executor for fire-and-forget UI tasks
pub type Spawner = Rc<dyn LocalSpawn>;

pub(crate) fn spawn_task(
    spawner: &Spawner,
    component: LogComponent,
    task: impl Future<Output = ()> + 'static,
) {
    if let Err(e) = spawner.spawn_local(task) {
        log_error!(component, "failed to spawn task: {}", e);
    }
}
