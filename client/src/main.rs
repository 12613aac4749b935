mod collation;
mod dom;
mod error;
mod hiding;
mod page;
mod sorting;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

fn main() {
    console_error_panic_hook::set_once();
    #[cfg(target_arch = "wasm32")]
    tracing_wasm::set_as_global_default();

    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    if document.ready_state() != "loading" {
        start();
        return;
    }

    let callback = Closure::once(start);
    if document
        .add_event_listener_with_callback("DOMContentLoaded", callback.as_ref().unchecked_ref())
        .is_err()
    {
        web_sys::console::error_1(&"trends tables: could not wait for DOMContentLoaded".into());
        return;
    }
    callback.forget();
}

fn start() {
    if let Err(err) = page::init() {
        web_sys::console::error_1(&format!("trends tables: {err}").into());
    }
}
