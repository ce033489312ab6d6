use std::rc::Rc;

use yew::prelude::*;

use super::dom;
use crate::navigation::{section_id, NavAction, NavState, Section, SECTIONS};

impl Reducible for NavState {
    type Action = NavAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = (*self).clone().apply(action);
        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct NavBarProps {
    pub brand: AttrValue,
    pub state: NavState,
    pub header_offset: f64,
    pub on_action: Callback<NavAction>,
}

fn nav_links(props: &NavBarProps, list_class: &'static str) -> Html {
    let render = |section: &Section| {
        let href = format!("#{}", section.id);
        let onclick = {
            let on_action = props.on_action.clone();
            let header_offset = props.header_offset;
            let href = href.clone();
            Callback::from(move |event: MouseEvent| {
                let Some(id) = section_id(&href) else {
                    return;
                };
                event.prevent_default();
                dom::scroll_to_section(id, header_offset);
                on_action.emit(NavAction::Navigate(id.to_string()));
            })
        };

        html! {
            <li>
                <a
                    class={classes!("nav-link", props.state.is_active(section.id).then_some("active"))}
                    {href}
                    {onclick}
                >
                    {section.label}
                </a>
            </li>
        }
    };

    html! {
        <ul class={list_class}>
            { for SECTIONS.iter().map(render) }
        </ul>
    }
}

#[function_component(NavBar)]
pub fn nav_bar(props: &NavBarProps) -> Html {
    let on_toggle = {
        let on_action = props.on_action.clone();
        Callback::from(move |_: MouseEvent| on_action.emit(NavAction::ToggleMenu))
    };

    let backdrop_ref = use_node_ref();
    let on_backdrop = {
        let on_action = props.on_action.clone();
        let backdrop_ref = backdrop_ref.clone();
        Callback::from(move |event: MouseEvent| {
            if dom::is_event_on(&event, &backdrop_ref) {
                on_action.emit(NavAction::CloseMenu);
            }
        })
    };

    let open = props.state.menu_open;

    html! {
        <header class="site-header">
            <nav class="navbar">
                <a class="logo" href="#home">{props.brand.clone()}</a>
                {nav_links(props, "nav-links")}
                <button
                    class={classes!("menu-toggle", open.then_some("active"))}
                    type="button"
                    aria-label="Toggle navigation"
                    aria-expanded={open.to_string()}
                    onclick={on_toggle}
                >
                    <i class={if open { "fas fa-times" } else { "fas fa-bars" }}></i>
                </button>
            </nav>
            <div
                ref={backdrop_ref}
                class={classes!("mobile-menu", open.then_some("active"))}
                onclick={on_backdrop}
            >
                {nav_links(props, "mobile-nav-links")}
            </div>
        </header>
    }
}
