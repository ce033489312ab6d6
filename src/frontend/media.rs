use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_timers::callback::Interval;
use serde_json::json;
use wasm_bindgen::JsValue;
use web_sys::{Element, HtmlMediaElement};
use yew::prelude::*;

use super::dom;
use super::youtube::{self, PlayerBinding, PlayerEvents};
use crate::config::SiteConfig;
use crate::content::MediaSource;
use crate::media::{
    first_supported, fullscreen_icon, mute_icon, play_icon, MediaControls, Player, PlayerState, ProgressTimer,
    EXIT_FULLSCREEN, FULLSCREEN_CHANGE_EVENTS, FULLSCREEN_ELEMENT, PROGRESS_TICK_MS, REQUEST_FULLSCREEN,
};
use crate::telemetry::{log_event, LogLevel};

const YOUTUBE_ELEMENT_ID: &str = "inspirationVideo";

pub enum MediaHandle {
    Youtube(youtube::Player),
    Element(HtmlMediaElement),
}

impl Player for MediaHandle {
    fn is_paused(&self) -> bool {
        match self {
            Self::Youtube(player) => player.is_paused(),
            Self::Element(element) => element.paused(),
        }
    }

    fn play(&self) {
        match self {
            Self::Youtube(player) => Player::play(player),
            Self::Element(element) => {
                let _ = element.play();
            }
        }
    }

    fn pause(&self) {
        match self {
            Self::Youtube(player) => Player::pause(player),
            Self::Element(element) => {
                let _ = element.pause();
            }
        }
    }

    fn set_muted(&self, muted: bool) {
        match self {
            Self::Youtube(player) => Player::set_muted(player, muted),
            Self::Element(element) => element.set_muted(muted),
        }
    }

    fn seek_to(&self, seconds: f64) {
        match self {
            Self::Youtube(player) => Player::seek_to(player, seconds),
            Self::Element(element) => element.set_current_time(seconds),
        }
    }

    fn current_time(&self) -> f64 {
        match self {
            Self::Youtube(player) => Player::current_time(player),
            Self::Element(element) => element.current_time(),
        }
    }

    fn duration(&self) -> f64 {
        match self {
            Self::Youtube(player) => Player::duration(player),
            Self::Element(element) => element.duration(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct MediaView {
    playing: bool,
    muted: bool,
    percent: f64,
    label: String,
    failed: bool,
}

impl Default for MediaView {
    fn default() -> Self {
        Self {
            playing: false,
            muted: false,
            percent: 0.0,
            label: "0:00 / 0:00".to_string(),
            failed: false,
        }
    }
}

#[derive(Clone)]
struct MediaRuntime {
    controls: Rc<RefCell<Option<MediaControls<MediaHandle>>>>,
    timer: Rc<RefCell<Option<Interval>>>,
    view: UseStateHandle<MediaView>,
    config: Rc<SiteConfig>,
}

impl MediaRuntime {
    fn attach(&self, controls: MediaControls<MediaHandle>) {
        *self.controls.borrow_mut() = Some(controls);
    }

    fn publish(&self) {
        let next = match self.controls.borrow().as_ref() {
            Some(controls) => MediaView {
                playing: controls.session().is_playing,
                muted: controls.session().is_muted,
                percent: controls.progress_percent(),
                label: controls.time_label(),
                failed: controls.is_failed(),
            },
            None => return,
        };
        self.view.set(next);
    }

    fn with_controls(&self, action: impl FnOnce(&mut MediaControls<MediaHandle>)) {
        if let Some(controls) = self.controls.borrow_mut().as_mut() {
            action(controls);
        }
        self.publish();
    }

    fn sync(&self) {
        self.with_controls(|controls| controls.sync());
    }

    fn on_state(&self, state: PlayerState) {
        let mut timer = ProgressTimer::Keep;
        self.with_controls(|controls| timer = controls.apply_state(state));
        self.set_timer(timer);
    }

    fn set_timer(&self, action: ProgressTimer) {
        match action {
            ProgressTimer::Start => {
                if self.timer.borrow().is_some() {
                    return;
                }
                let runtime = self.clone();
                let interval = Interval::new(PROGRESS_TICK_MS, move || runtime.sync());
                *self.timer.borrow_mut() = Some(interval);
            }
            ProgressTimer::Stop => {
                self.timer.borrow_mut().take();
            }
            ProgressTimer::Keep => {}
        }
    }

    fn fail(&self, code: Option<i32>) {
        log_event(
            &self.config,
            LogLevel::Error,
            "media_player_failed",
            json!({ "code": code }),
        );
        self.timer.borrow_mut().take();
        self.with_controls(|controls| controls.fail());
        let mut failed = (*self.view).clone();
        failed.failed = true;
        failed.playing = false;
        self.view.set(failed);
    }

    fn dispose(&self) {
        self.timer.borrow_mut().take();
        self.controls.borrow_mut().take();
    }
}

fn is_fullscreen() -> bool {
    let Some(document) = dom::document() else {
        return false;
    };
    let document: JsValue = document.into();
    FULLSCREEN_ELEMENT
        .iter()
        .any(|name| dom::has_property(&document, name))
}

fn toggle_fullscreen(container: &Element) -> Option<&'static str> {
    let (target, candidates): (JsValue, &[&'static str]) = if is_fullscreen() {
        (dom::document()?.into(), &EXIT_FULLSCREEN[..])
    } else {
        (container.clone().into(), &REQUEST_FULLSCREEN[..])
    };

    first_supported(candidates, |name| {
        dom::method(&target, name)
            .map(|function| function.call0(&target).is_ok())
            .unwrap_or(false)
    })
}

fn bind_youtube(runtime: &MediaRuntime, mounted: &Rc<Cell<bool>>) -> Option<PlayerBinding> {
    if !mounted.get() {
        return None;
    }

    let ready = runtime.clone();
    let state = runtime.clone();
    let error = runtime.clone();
    let events = PlayerEvents {
        on_ready: Box::new(move || ready.with_controls(|controls| controls.mark_ready())),
        on_state_change: Box::new(move |code| {
            if let Some(player_state) = PlayerState::from_code(code) {
                state.on_state(player_state);
            }
        }),
        on_error: Box::new(move |code| error.fail(Some(code))),
    };

    match youtube::bind_player(YOUTUBE_ELEMENT_ID, events) {
        Ok(binding) => {
            runtime.attach(MediaControls::awaiting_ready(MediaHandle::Youtube(
                binding.player().clone(),
            )));
            Some(binding)
        }
        Err(error) => {
            log_event(
                &runtime.config,
                LogLevel::Error,
                "media_player_bind_failed",
                json!({ "error": error.to_string() }),
            );
            runtime.fail(None);
            None
        }
    }
}

fn bind_element(runtime: &MediaRuntime, element: HtmlMediaElement) -> Vec<EventListener> {
    runtime.attach(MediaControls::new(MediaHandle::Element(element.clone())));
    runtime.sync();

    let mut listeners = Vec::new();
    for event in ["loadedmetadata", "durationchange", "timeupdate"] {
        let runtime = runtime.clone();
        listeners.push(EventListener::new(&element, event, move |_| runtime.sync()));
    }
    for (event, state) in [
        ("playing", PlayerState::Playing),
        ("pause", PlayerState::Paused),
    ] {
        let runtime = runtime.clone();
        listeners.push(EventListener::new(&element, event, move |_| runtime.on_state(state)));
    }
    {
        let runtime = runtime.clone();
        listeners.push(EventListener::new(&element, "ended", move |_| {
            runtime.on_state(PlayerState::Ended);
            runtime.with_controls(|controls| controls.reset_progress());
        }));
    }
    {
        let runtime = runtime.clone();
        listeners.push(EventListener::new(&element, "error", move |_| runtime.fail(None)));
    }

    listeners
}

#[derive(Properties, PartialEq)]
pub struct MediaPlayerProps {
    pub source: MediaSource,
    pub config: Rc<SiteConfig>,
}

#[function_component(MediaPlayer)]
pub fn media_player(props: &MediaPlayerProps) -> Html {
    let view = use_state(MediaView::default);
    let fullscreen = use_state(is_fullscreen);
    let controls = use_mut_ref(|| None::<MediaControls<MediaHandle>>);
    let timer = use_mut_ref(|| None::<Interval>);
    let container_ref = use_node_ref();
    let audio_ref = use_node_ref();
    let progress_ref = use_node_ref();

    let runtime = MediaRuntime {
        controls,
        timer,
        view: view.clone(),
        config: props.config.clone(),
    };

    {
        let runtime = runtime.clone();
        let audio_ref = audio_ref.clone();
        use_effect_with(props.source.clone(), move |source| {
            let mounted = Rc::new(Cell::new(true));
            let binding: Rc<RefCell<Option<PlayerBinding>>> = Rc::new(RefCell::new(None));
            let mut listeners = Vec::new();

            match source {
                MediaSource::Youtube { .. } => {
                    let ready_runtime = runtime.clone();
                    let ready_mounted = mounted.clone();
                    let ready_binding = binding.clone();
                    let loaded = youtube::load_iframe_api(move || {
                        *ready_binding.borrow_mut() = bind_youtube(&ready_runtime, &ready_mounted);
                    });
                    if let Err(error) = loaded {
                        log_event(
                            &runtime.config,
                            LogLevel::Error,
                            "media_api_load_failed",
                            json!({ "error": error.to_string() }),
                        );
                    }
                }
                MediaSource::Audio { .. } => {
                    if let Some(element) = audio_ref.cast::<HtmlMediaElement>() {
                        listeners = bind_element(&runtime, element);
                    }
                }
            }

            move || {
                mounted.set(false);
                drop(listeners);
                runtime.dispose();
                binding.borrow_mut().take();
            }
        });
    }

    {
        let fullscreen = fullscreen.clone();
        use_effect_with((), move |_| {
            let listeners: Vec<EventListener> = dom::document()
                .map(|document| {
                    FULLSCREEN_CHANGE_EVENTS
                        .iter()
                        .map(|event| {
                            let fullscreen = fullscreen.clone();
                            EventListener::new(&document, *event, move |_| fullscreen.set(is_fullscreen()))
                        })
                        .collect()
                })
                .unwrap_or_default();

            move || drop(listeners)
        });
    }

    let on_play_pause = {
        let runtime = runtime.clone();
        Callback::from(move |_: MouseEvent| runtime.with_controls(|controls| controls.toggle_play_pause()))
    };

    let on_mute = {
        let runtime = runtime.clone();
        Callback::from(move |_: MouseEvent| {
            runtime.with_controls(|controls| {
                controls.toggle_mute();
            })
        })
    };

    let on_seek = {
        let runtime = runtime.clone();
        let progress_ref = progress_ref.clone();
        Callback::from(move |event: MouseEvent| {
            let Some(bar) = progress_ref.cast::<Element>() else {
                return;
            };
            let rect = bar.get_bounding_client_rect();
            let offset_x = f64::from(event.client_x()) - rect.left();
            runtime.with_controls(|controls| {
                controls.seek(offset_x, rect.width());
            });
        })
    };

    let on_fullscreen = {
        let container_ref = container_ref.clone();
        let config = props.config.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(container) = container_ref.cast::<Element>() else {
                return;
            };
            if toggle_fullscreen(&container).is_none() {
                log_event(&config, LogLevel::Info, "fullscreen_unavailable", json!({}));
            }
        })
    };

    let title = match &props.source {
        MediaSource::Youtube { title, .. } | MediaSource::Audio { title, .. } => title.clone(),
    };

    let body = if view.failed {
        html! {
            <div class="video-error">
                <div>
                    <i class="fas fa-exclamation-triangle"></i>
                    <h3>{"Video Unavailable"}</h3>
                    <p>{"Please check your internet connection or try another video."}</p>
                </div>
            </div>
        }
    } else {
        match &props.source {
            MediaSource::Youtube { video_id, title } => html! {
                <iframe
                    id={YOUTUBE_ELEMENT_ID}
                    src={format!("https://www.youtube.com/embed/{video_id}?enablejsapi=1&controls=0&rel=0")}
                    title={title.clone()}
                    frameborder="0"
                    allow="autoplay; encrypted-media; picture-in-picture"
                    allowfullscreen="true"
                />
            },
            MediaSource::Audio { src, .. } => html! {
                <audio ref={audio_ref.clone()} id="inspirationAudio" src={src.clone()} preload="metadata" />
            },
        }
    };

    let controls = (!view.failed).then(|| {
        html! {
            <div class="video-controls">
                <button class="video-btn play-pause" type="button" aria-label="Play or pause" onclick={on_play_pause}>
                    <i class={play_icon(view.playing)}></i>
                </button>
                <button class="video-btn mute-btn" type="button" aria-label="Mute or unmute" onclick={on_mute}>
                    <i class={mute_icon(view.muted)}></i>
                </button>
                <div class="progress-bar" ref={progress_ref} onclick={on_seek}>
                    <div class="progress" style={format!("width: {:.2}%;", view.percent)}></div>
                </div>
                <span class="time">{view.label.clone()}</span>
                <button class="video-btn fullscreen-btn" type="button" aria-label="Toggle fullscreen" onclick={on_fullscreen}>
                    <i class={fullscreen_icon(*fullscreen)}></i>
                </button>
            </div>
        }
    });

    html! {
        <section id="inspiration" class="inspiration-section">
            <h2 class="section-title">{title}</h2>
            <div class="video-player" ref={container_ref}>
                <div class="video-container">{body}</div>
                {controls}
            </div>
        </section>
    }
}
