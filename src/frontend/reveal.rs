use js_sys::Array;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

const REVEAL_THRESHOLD: f64 = 0.1;
const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
const VISIBLE_CLASS: &str = "visible";

struct RevealObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn observe_once(element: &Element, on_reveal: Callback<()>) -> Option<RevealObserver> {
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }

                let target = entry.target();
                let _ = target.class_list().add_1(VISIBLE_CLASS);
                observer.unobserve(&target);
                on_reveal.emit(());
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    options.set_root_margin(REVEAL_ROOT_MARGIN);

    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options).ok()?;
    observer.observe(element);

    Some(RevealObserver {
        observer,
        _callback: callback,
    })
}

/// Adds `visible` to the referenced element the first time it scrolls into view
/// and reports whether that has happened yet. Missing elements or an absent
/// observer API leave the element untouched.
#[hook]
pub fn use_scroll_reveal(node: NodeRef) -> bool {
    let revealed = use_state(|| false);

    {
        let revealed = revealed.clone();
        use_effect_with(node, move |node| {
            let on_reveal = Callback::from(move |_| revealed.set(true));
            let reveal = node
                .cast::<Element>()
                .and_then(|element| observe_once(&element, on_reveal));
            move || drop(reveal)
        });
    }

    *revealed
}
