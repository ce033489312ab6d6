use std::rc::Rc;

use futures_util::future::LocalBoxFuture;
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use js_sys::{Array, Object, Reflect, Uint8Array};
use serde_json::json;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{window, File, FilePropertyBag, Navigator};
use yew::prelude::*;

use super::dom;
use crate::certificate::{CertificateFile, CertificateKind, CertificateModal, ExitSignal, ModalPhase};
use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::share::{share_with_fallbacks, ShareRequest, ShareStrategy};
use crate::telemetry::{log_event, LogLevel};

pub enum ModalAction {
    Show(CertificateFile),
    RequestClose,
    FinishClose(ExitSignal),
}

impl Reducible for CertificateModal {
    type Action = ModalAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        let changed = match action {
            ModalAction::Show(file) => {
                next.show(file);
                true
            }
            ModalAction::RequestClose => next.request_close(),
            ModalAction::FinishClose(signal) => next.finish_exit(signal),
        };

        if changed {
            Rc::new(next)
        } else {
            self
        }
    }
}

fn navigator() -> Option<Navigator> {
    window().map(|win| win.navigator())
}

fn share_available() -> bool {
    navigator()
        .map(|navigator| dom::has_property(&navigator, "share"))
        .unwrap_or(false)
}

async fn invoke_share(data: &Object) -> Result<(), SiteError> {
    let navigator = navigator().ok_or_else(|| SiteError::Share("navigator unavailable".to_string()))?;
    let share = dom::method(&navigator, "share")
        .ok_or_else(|| SiteError::Share("navigator.share unavailable".to_string()))?;
    let promise = share.call1(&navigator, data)?;
    JsFuture::from(js_sys::Promise::from(promise)).await?;
    Ok(())
}

struct FileShare;

impl FileShare {
    async fn build_file(request: &ShareRequest) -> Result<File, SiteError> {
        let response = Request::get(&request.source_url).send().await?;
        if !response.ok() {
            return Err(SiteError::Status(response.status()));
        }
        let mime = response.headers().get("content-type").unwrap_or_default();
        let bytes = response.binary().await?;

        let parts = Array::of1(&Uint8Array::from(bytes.as_slice()));
        let options = FilePropertyBag::new();
        options.set_type(&mime);
        let file = File::new_with_u8_array_sequence_and_options(&parts, &request.filename, &options)?;
        Ok(file)
    }
}

impl ShareStrategy for FileShare {
    fn name(&self) -> &'static str {
        "file"
    }

    fn attempt<'a>(&'a self, request: &'a ShareRequest) -> LocalBoxFuture<'a, Result<(), SiteError>> {
        Box::pin(async move {
            let file = Self::build_file(request).await?;

            let data = Object::new();
            Reflect::set(&data, &JsValue::from_str("files"), &Array::of1(&file))?;
            Reflect::set(&data, &JsValue::from_str("title"), &JsValue::from_str(&request.title))?;
            Reflect::set(&data, &JsValue::from_str("text"), &JsValue::from_str(&request.file_text()))?;

            let navigator = navigator().ok_or_else(|| SiteError::Share("navigator unavailable".to_string()))?;
            let can_share = dom::method(&navigator, "canShare")
                .and_then(|can_share| can_share.call1(&navigator, &data).ok())
                .map(|answer| answer.is_truthy())
                .unwrap_or(false);
            if !can_share {
                return Err(SiteError::Share("files are not shareable here".to_string()));
            }

            invoke_share(&data).await
        })
    }
}

struct LinkShare;

impl ShareStrategy for LinkShare {
    fn name(&self) -> &'static str {
        "link"
    }

    fn attempt<'a>(&'a self, request: &'a ShareRequest) -> LocalBoxFuture<'a, Result<(), SiteError>> {
        Box::pin(async move {
            let data = Object::new();
            Reflect::set(&data, &JsValue::from_str("title"), &JsValue::from_str(request.link_title()))?;
            Reflect::set(&data, &JsValue::from_str("text"), &JsValue::from_str(&request.link_text()))?;
            Reflect::set(&data, &JsValue::from_str("url"), &JsValue::from_str(&request.page_url))?;
            invoke_share(&data).await
        })
    }
}

fn share_request(file: &CertificateFile) -> ShareRequest {
    ShareRequest {
        source_url: file.source.clone(),
        title: file.title.clone(),
        filename: file.filename.clone(),
        page_url: dom::location_href().unwrap_or_default(),
    }
}

#[derive(Properties, PartialEq)]
pub struct CertificateOverlayProps {
    pub modal: CertificateModal,
    pub config: Rc<SiteConfig>,
    pub on_close: Callback<()>,
    pub on_closed: Callback<ExitSignal>,
}

#[function_component(CertificateOverlay)]
pub fn certificate_overlay(props: &CertificateOverlayProps) -> Html {
    let phase = props.modal.phase();
    let backdrop_ref = use_node_ref();

    {
        let on_closed = props.on_closed.clone();
        let exit_ms = props.config.modal_exit_ms;
        use_effect_with(phase, move |phase| {
            let fallback =
                (*phase == ModalPhase::Closing).then(|| Timeout::new(exit_ms, move || on_closed.emit(ExitSignal::FallbackTimer)));
            move || drop(fallback)
        });
    }

    let Some(file) = props.modal.file().cloned() else {
        return html! {};
    };

    let on_backdrop = {
        let on_close = props.on_close.clone();
        let backdrop_ref = backdrop_ref.clone();
        Callback::from(move |event: MouseEvent| {
            if dom::is_event_on(&event, &backdrop_ref) {
                on_close.emit(());
            }
        })
    };

    let on_close_button = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let exit_signal = {
        let backdrop_ref = backdrop_ref.clone();
        move |event: &Event| {
            if dom::is_event_on(event, &backdrop_ref) {
                ExitSignal::Overlay
            } else {
                ExitSignal::Descendant
            }
        }
    };

    let on_animation_end = {
        let on_closed = props.on_closed.clone();
        let exit_signal = exit_signal.clone();
        Callback::from(move |event: AnimationEvent| on_closed.emit(exit_signal(&event)))
    };

    let on_transition_end = {
        let on_closed = props.on_closed.clone();
        Callback::from(move |event: TransitionEvent| on_closed.emit(exit_signal(&event)))
    };

    let on_download = {
        let file = file.clone();
        let config = props.config.clone();
        Callback::from(move |_: MouseEvent| {
            if let Err(error) = dom::trigger_download(&file.source, &file.filename) {
                log_event(
                    &config,
                    LogLevel::Error,
                    "certificate_download_failed",
                    json!({ "filename": file.filename, "error": error.to_string() }),
                );
            }
        })
    };

    let on_share = {
        let file = file.clone();
        let config = props.config.clone();
        Callback::from(move |_: MouseEvent| {
            let request = share_request(&file);
            let config = config.clone();
            spawn_local(async move {
                let strategies: Vec<Box<dyn ShareStrategy>> = vec![Box::new(FileShare), Box::new(LinkShare)];
                let outcome = share_with_fallbacks(&config, share_available(), &strategies, &request).await;
                if let Some(notice) = outcome.notice() {
                    dom::alert(notice);
                }
            });
        })
    };

    let preview = match file.kind {
        CertificateKind::Document => html! {
            <iframe class="certificate-frame" src={file.source.clone()} title={file.title.clone()} />
        },
        CertificateKind::Image => html! {
            <img class="certificate-image" src={file.source.clone()} alt={file.title.clone()} />
        },
    };

    html! {
        <div
            ref={backdrop_ref}
            class={classes!("certificate-modal", "active", (phase == ModalPhase::Closing).then_some("closing"))}
            role="dialog"
            aria-modal="true"
            aria-label={file.title.clone()}
            onclick={on_backdrop}
            onanimationend={on_animation_end}
            ontransitionend={on_transition_end}
        >
            <div class="certificate-modal-content">
                <button class="certificate-close" type="button" aria-label="Close certificate" onclick={on_close_button}>
                    <i class="fas fa-times"></i>
                </button>
                <h3 class="certificate-title">{file.title.clone()}</h3>
                <div class="certificate-preview">{preview}</div>
                <div class="certificate-actions">
                    <button class="btn btn-primary" type="button" onclick={on_download}>
                        <i class="fas fa-download"></i>{" Download"}
                    </button>
                    <button class="btn btn-secondary" type="button" onclick={on_share}>
                        <i class="fas fa-share-alt"></i>{" Share"}
                    </button>
                </div>
            </div>
        </div>
    }
}
