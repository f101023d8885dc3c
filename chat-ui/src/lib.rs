//! Page controller for the server-rendered chat page.
//!
//! Built with `wasm-pack build --target web` and loaded by the page as an ES
//! module; [`start`] runs as soon as the module is instantiated.

pub mod controller;
pub mod dom;
pub mod events;
pub mod handlers;
pub mod interop;
pub mod memory;
pub mod mutation;
pub mod page;
pub mod services;
pub mod storage;
pub mod theme;

use std::rc::Rc;

use wasm_bindgen::prelude::*;

pub use controller::PageController;
pub use dom::DomPage;
pub use handlers::KeyPress;
pub use interop::{BrowserClipboard, BrowserTimers};
pub use memory::MemoryPage;
pub use mutation::Mutation;
pub use page::{BubbleText, Page, PageError};
pub use services::{Clipboard, ManualTimers, RecordingClipboard, Timers};
pub use storage::{BrowserStorage, KeyValueStore, MemoryStore};
pub use theme::ThemeController;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    wasm_logger::init(wasm_logger::Config::default());

    let page = DomPage::from_window()?;
    let store: Box<dyn KeyValueStore> = match BrowserStorage::from_window() {
        Some(storage) => Box::new(storage),
        None => {
            log::warn!("localStorage unavailable; theme will not persist across reloads");
            Box::new(MemoryStore::default())
        }
    };

    let controller = Rc::new(PageController::new(
        page,
        store,
        Box::new(BrowserClipboard),
        Box::new(BrowserTimers),
    ));
    events::install(controller)?;

    log::info!("Chat page controller started");
    Ok(())
}
