//! Tokio runtime and Wiremock server shared across the steps of one scenario.

use std::cell::RefCell;
use std::future::Future;
use std::io;
use std::rc::Rc;

use rstest_bdd::Slot;
use tokio::runtime::Runtime;
use wiremock::MockServer;

/// Runtime wrapper that can be stored in an `rstest-bdd` Slot.
#[derive(Clone)]
pub struct SharedRuntime(Rc<RefCell<Runtime>>);

impl SharedRuntime {
    pub fn new(runtime: Runtime) -> Self {
        Self(Rc::new(RefCell::new(runtime)))
    }

    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.0.borrow().block_on(future)
    }
}

/// Starts the runtime and the double on first use and returns the runtime.
///
/// # Errors
///
/// Returns an error if the Tokio runtime cannot be created.
pub fn ensure_runtime_and_server(
    runtime: &Slot<SharedRuntime>,
    server: &Slot<MockServer>,
) -> Result<SharedRuntime, io::Error> {
    let shared_runtime = match runtime.get() {
        Some(existing) => existing,
        None => {
            let created = SharedRuntime::new(Runtime::new()?);
            runtime.set(created.clone());
            created
        }
    };

    if server.with_ref(|_| ()).is_none() {
        server.set(shared_runtime.block_on(MockServer::start()));
    }

    Ok(shared_runtime)
}

/// Runs `action` with the scenario runtime and the started double.
///
/// # Panics
///
/// Panics if the runtime or server have not been started.
pub fn with_server<T>(
    runtime: &Slot<SharedRuntime>,
    server: &Slot<MockServer>,
    action: impl FnOnce(&SharedRuntime, &MockServer) -> T,
) -> T {
    let shared_runtime = runtime
        .get()
        .unwrap_or_else(|| panic!("runtime not initialised"));
    server
        .with_ref(|mock_server| action(&shared_runtime, mock_server))
        .unwrap_or_else(|| panic!("mock server not initialised"))
}
