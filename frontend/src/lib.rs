use leptos::*;
use leptos_meta::provide_meta_context;
use leptos_router::*;
use std::rc::Rc;

mod api;
mod components;
pub mod config;
mod pages;
mod state;
#[cfg(test)]
mod test_support;

use pages::AdminRosterPage;
use state::{
    auth::AuthProvider,
    firebase::FirebaseSession,
    session::{MemorySession, SessionProvider},
};

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    if let Err(err) = console_log::init_with_level(level) {
        web_sys::console::error_1(&format!("failed to install logger: {}", err).into());
    }
    log::info!("Starting Admin Roster frontend");

    // window.__ADMINROSTER_ENV (env.js) takes precedence over ./config.json.
    spawn_local(config::init());

    let session = browser_session();
    mount_to_body(move || view! { <App session=session /> });
}

fn browser_session() -> Rc<dyn SessionProvider> {
    match FirebaseSession::from_window() {
        Ok(session) => Rc::new(session),
        Err(err) => {
            log::error!("Identity provider unavailable: {}", err);
            Rc::new(MemorySession::signed_out())
        }
    }
}

#[component]
fn App(session: Rc<dyn SessionProvider>) -> impl IntoView {
    provide_meta_context();

    view! {
        <AuthProvider session=session>
            <Router>
                <Routes>
                    <Route path="/" view=AdminRosterPage/>
                    <Route path="/admins" view=AdminRosterPage/>
                </Routes>
            </Router>
        </AuthProvider>
    }
}
