mod contact;
mod dom;
mod media;
mod modal;
mod nav;
mod particles;
mod reveal;
mod rotator;
mod sections;
mod youtube;

use std::rc::Rc;

use gloo_events::EventListener;
use serde_json::json;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::prelude::*;

use crate::certificate::{CertificateFile, CertificateModal};
use crate::config::SiteConfig;
use crate::content::PortfolioData;
use crate::navigation::{shortcut_for, NavAction, NavState, Shortcut};
use crate::scroll::{LockHolder, ScrollLock};
use crate::telemetry::{log_event, LogLevel};

use contact::ContactSection;
use media::MediaPlayer;
use modal::{CertificateOverlay, ModalAction};
use nav::NavBar;
use particles::ParticleCanvas;
use sections::{About, Achievements, Experience, Hero, Projects, Skills};

const MOUNT_ID: &str = "app";

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: Rc<SiteConfig>,
    pub data: Rc<PortfolioData>,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let nav = use_reducer(NavState::default);
    let modal = use_reducer(CertificateModal::default);

    let badges = use_memo(props.data.clone(), |data| data.badges.clone());
    let stats = use_memo(props.data.clone(), |data| data.stats.clone());
    let quotes = use_memo(props.data.clone(), |data| data.quotes.clone());
    let projects = use_memo(props.data.clone(), |data| data.projects.clone());
    let experience = use_memo(props.data.clone(), |data| data.experience.clone());
    let achievements = use_memo(props.data.clone(), |data| data.achievements.clone());
    let skills = use_memo(props.data.clone(), |data| data.skills.clone());

    let scroll_lock = {
        let mut lock = ScrollLock::default();
        if nav.menu_open {
            lock.acquire(LockHolder::MobileMenu);
        }
        if modal.is_mounted() {
            lock.acquire(LockHolder::CertificateModal);
        }
        lock
    };

    use_effect_with(scroll_lock.overflow(), |overflow| {
        dom::set_body_overflow(overflow);
        || ()
    });

    {
        let nav = nav.clone();
        let modal = modal.clone();
        use_effect_with((), move |_| {
            let listener = dom::document().map(|document| {
                EventListener::new(&document, "keydown", move |event| {
                    let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                        return;
                    };
                    if shortcut_for(&event.key(), event.ctrl_key(), event.meta_key())
                        == Some(Shortcut::CloseOverlays)
                    {
                        nav.dispatch(NavAction::CloseMenu);
                        modal.dispatch(ModalAction::RequestClose);
                    }
                })
            });

            move || drop(listener)
        });
    }

    {
        let config = props.config.clone();
        let data = props.data.clone();
        use_effect_with((), move |_| {
            log_event(
                &config,
                LogLevel::Info,
                "app_mounted",
                json!({
                    "projects": data.projects.len(),
                    "achievements": data.achievements.len(),
                    "badge_mode": format!("{:?}", config.badge_mode),
                }),
            );
            || ()
        });
    }

    let on_nav = {
        let nav = nav.clone();
        Callback::from(move |action: NavAction| nav.dispatch(action))
    };

    let on_view_certificate = {
        let modal = modal.clone();
        let config = props.config.clone();
        Callback::from(move |file: CertificateFile| {
            log_event(
                &config,
                LogLevel::Debug,
                "certificate_opened",
                json!({ "title": file.title, "kind": format!("{:?}", file.kind) }),
            );
            modal.dispatch(ModalAction::Show(file));
        })
    };

    let on_close_certificate = {
        let modal = modal.clone();
        Callback::from(move |_| modal.dispatch(ModalAction::RequestClose))
    };

    let on_certificate_closed = {
        let modal = modal.clone();
        Callback::from(move |signal| modal.dispatch(ModalAction::FinishClose(signal)))
    };

    let media = props
        .data
        .media
        .clone()
        .map(|source| html! { <MediaPlayer {source} config={props.config.clone()} /> });

    html! {
        <>
            <ParticleCanvas config={props.config.clone()} />
            <NavBar
                brand={AttrValue::from(props.data.profile.name.clone())}
                state={(*nav).clone()}
                header_offset={props.config.header_offset_px}
                on_action={on_nav}
            />
            <main id="content">
                <Hero
                    profile={props.data.profile.clone()}
                    {badges}
                    {stats}
                    config={props.config.clone()}
                />
                <About
                    profile={props.data.profile.clone()}
                    {quotes}
                    quote_interval_ms={props.config.quote_interval_ms}
                />
                {media}
                <Projects {projects} />
                <Experience entries={experience} />
                <Achievements {achievements} on_view={on_view_certificate} />
                <Skills groups={skills} />
                <ContactSection profile={props.data.profile.clone()} config={props.config.clone()} />
            </main>
            <CertificateOverlay
                modal={(*modal).clone()}
                config={props.config.clone()}
                on_close={on_close_certificate}
                on_closed={on_certificate_closed}
            />
        </>
    }
}

pub fn run() {
    let config = SiteConfig::default();
    let Some(root) = dom::document().and_then(|document| document.get_element_by_id(MOUNT_ID)) else {
        log_event(
            &config,
            LogLevel::Error,
            "mount_point_missing",
            json!({ "id": MOUNT_ID }),
        );
        return;
    };

    let config = SiteConfig::from_attributes(|name| root.get_attribute(name));
    let data = PortfolioData::load().unwrap_or_else(|error| {
        log_event(
            &config,
            LogLevel::Error,
            "content_load_failed",
            json!({ "error": error.to_string() }),
        );
        PortfolioData::default()
    });

    yew::Renderer::<App>::with_root_and_props(
        root,
        AppProps {
            config: Rc::new(config),
            data: Rc::new(data),
        },
    )
    .render();
}
