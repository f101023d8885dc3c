//! Browser event wiring.
//!
//! Every listener runs one controller behavior and logs its failure, so a
//! broken handler never takes the others down with it.

use std::rc::Rc;

use shared_types::{PageAction, PageElement, ACTION_ATTRIBUTE, QUESTION_ATTRIBUTE};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, KeyboardEvent, MouseEvent};

use crate::controller::PageController;
use crate::dom::DomPage;
use crate::handlers::KeyPress;
use crate::page::PageError;

type Controller = Rc<PageController<DomPage>>;

pub fn install(controller: Controller) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or(PageError::Unavailable("window"))?;
    let document = controller.page().document().clone();

    if document.ready_state() == "complete" {
        bootstrap(&controller);
    } else {
        let on_load_controller = Rc::clone(&controller);
        let on_load = Closure::wrap(Box::new(move |_event: Event| {
            bootstrap(&on_load_controller);
        }) as Box<dyn FnMut(Event)>);
        window.add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())?;
        on_load.forget();
    }

    let on_key_controller = Rc::clone(&controller);
    let on_keydown = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        let key = KeyPress::new(event.key(), event.shift_key());
        match on_key_controller.handle_key(&key) {
            Ok(true) => event.prevent_default(),
            Ok(false) => {}
            Err(err) => log::warn!("Enter-to-submit failed: {err}"),
        }
    }) as Box<dyn FnMut(KeyboardEvent)>);
    document.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())?;
    on_keydown.forget();

    let on_click_controller = Rc::clone(&controller);
    let on_click = Closure::wrap(Box::new(move |event: MouseEvent| {
        let Some(target) = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
        else {
            return;
        };
        dispatch_click(&on_click_controller, &target);
    }) as Box<dyn FnMut(MouseEvent)>);
    document.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();

    match document.get_element_by_id(PageElement::ChatForm.id().unwrap_or_default()) {
        Some(form) => {
            let on_submit_controller = Rc::clone(&controller);
            let on_submit = Closure::wrap(Box::new(move |_event: Event| {
                if let Err(err) = on_submit_controller.show_loading() {
                    log::warn!("Failed to show loading state: {err}");
                }
            }) as Box<dyn FnMut(Event)>);
            form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
            on_submit.forget();
        }
        None => log::warn!("No {} on page; send button will not show loading", PageElement::ChatForm),
    }

    Ok(())
}

fn bootstrap(controller: &Controller) {
    if let Err(err) = controller.bootstrap() {
        log::warn!("Page bootstrap failed: {err}");
    }
}

fn control_selector() -> String {
    let overlay = PageElement::SidebarOverlay.selector();
    format!("[{ACTION_ATTRIBUTE}], {overlay}")
}

fn dispatch_click(controller: &Controller, target: &Element) {
    let control = match target.closest(&control_selector()) {
        Ok(Some(control)) => control,
        Ok(None) => return,
        Err(err) => {
            log::warn!("Failed to resolve clicked control: {:?}", err);
            return;
        }
    };

    let overlay_class = PageElement::SidebarOverlay.class_name().unwrap_or_default();
    let action = match control.get_attribute(ACTION_ATTRIBUTE) {
        Some(name) => match name.parse::<PageAction>() {
            Ok(action) => action,
            Err(err) => {
                log::warn!("{err}");
                return;
            }
        },
        None if control.class_list().contains(overlay_class) => PageAction::ToggleSidebar,
        None => return,
    };

    let result = match action {
        PageAction::Copy => copy(controller, &control),
        PageAction::ToggleTheme => controller.toggle_theme().map(|_| ()),
        PageAction::ToggleSidebar => controller.toggle_sidebar(),
        PageAction::Fill => {
            let question = control.get_attribute(QUESTION_ATTRIBUTE).unwrap_or_default();
            controller.fill_question(&question)
        }
    };
    if let Err(err) = result {
        log::warn!("{} failed: {err}", action.as_str());
    }
}

fn copy(controller: &Controller, control: &Element) -> Result<(), PageError> {
    let bubble = controller.page().bubble_text(control)?;
    let controller = Rc::clone(controller);
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(err) = controller.copy_message(&bubble).await {
            log::warn!("Copy to clipboard failed: {err}");
        }
    });
    Ok(())
}
