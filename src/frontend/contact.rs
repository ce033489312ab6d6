use std::rc::Rc;

use futures_util::future::LocalBoxFuture;
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use serde_json::json;
use wasm_bindgen_futures::spawn_local;
use web_sys::{FormData, HtmlFormElement};
use yew::prelude::*;

use super::dom;
use super::reveal::use_scroll_reveal;
use crate::config::SiteConfig;
use crate::contact::{deliver, outcome_from_location, FormAction, FormState, FormTransport};
use crate::content::Profile;
use crate::error::SiteError;
use crate::telemetry::{log_event, LogLevel};

impl Reducible for FormState {
    type Action = FormAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = (*self).clone().apply(action);
        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}

struct FetchTransport {
    fields: FormData,
}

impl FormTransport for FetchTransport {
    fn post<'a>(&'a self, endpoint: &'a str) -> LocalBoxFuture<'a, Result<u16, SiteError>> {
        Box::pin(async move {
            let response = Request::post(endpoint)
                .header("Accept", "application/json")
                .body(self.fields.clone())?
                .send()
                .await?;
            Ok(response.status())
        })
    }
}

#[derive(Properties, PartialEq)]
pub struct ContactSectionProps {
    pub profile: Profile,
    pub config: Rc<SiteConfig>,
}

#[function_component(ContactSection)]
pub fn contact_section(props: &ContactSectionProps) -> Html {
    let state = use_reducer(FormState::default);
    let form_ref = use_node_ref();
    let section_ref = use_node_ref();
    use_scroll_reveal(section_ref.clone());

    {
        let state = state.clone();
        use_effect_with((), move |_| {
            if let Some(outcome) = dom::location_href().as_deref().and_then(outcome_from_location) {
                state.dispatch(FormAction::Redirected(outcome));
            }
            || ()
        });
    }

    {
        let form_ref = form_ref.clone();
        use_effect_with(state.reset_generation, move |generation| {
            if *generation > 0 {
                if let Some(form) = form_ref.cast::<HtmlFormElement>() {
                    form.reset();
                }
            }
            || ()
        });
    }

    {
        let state = state.clone();
        let dismiss_ms = props.config.status_dismiss_ms;
        use_effect_with((state.status_visible, state.outcome), move |(visible, _)| {
            let dismiss = visible.then(|| Timeout::new(dismiss_ms, move || state.dispatch(FormAction::Dismiss)));
            move || drop(dismiss)
        });
    }

    let onsubmit = {
        let state = state.clone();
        let form_ref = form_ref.clone();
        let config = props.config.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if state.submitting {
                return;
            }
            let Some(form) = form_ref.cast::<HtmlFormElement>() else {
                return;
            };
            let fields = match FormData::new_with_form(&form) {
                Ok(fields) => fields,
                Err(error) => {
                    log_event(
                        &config,
                        LogLevel::Error,
                        "contact_form_unreadable",
                        json!({ "error": SiteError::from(error).to_string() }),
                    );
                    return;
                }
            };

            state.dispatch(FormAction::Begin);
            let state = state.clone();
            let config = config.clone();
            spawn_local(async move {
                let transport = FetchTransport { fields };
                let outcome = deliver(&config, &transport, &config.form_endpoint).await;
                state.dispatch(FormAction::Settle(outcome));
            });
        })
    };

    let form_class = classes!(
        "contact-form",
        state.submitting.then_some("submitting"),
        state.outcome.map(|outcome| outcome.class()),
    );
    let status_class = classes!(state.status_class(), state.status_visible.then_some("visible"));
    let status_style = if state.status_visible { "display: block;" } else { "display: none;" };

    html! {
        <section id="contact" class="contact-section fade-in" ref={section_ref}>
            <h2 class="section-title">{"Get In Touch"}</h2>
            <div class="contact-content">
                <div class="contact-info">
                    <p>{"Have a project in mind or just want to say hi? My inbox is always open."}</p>
                    { for props.profile.email.iter().map(|email| html! {
                        <a class="contact-link" href={format!("mailto:{email}")}>
                            <i class="fas fa-envelope"></i>{format!(" {email}")}
                        </a>
                    }) }
                    { for props.profile.location.iter().map(|location| html! {
                        <span class="contact-link">
                            <i class="fas fa-map-marker-alt"></i>{format!(" {location}")}
                        </span>
                    }) }
                </div>
                <form
                    ref={form_ref}
                    class={form_class}
                    action={props.config.form_endpoint.clone()}
                    method="POST"
                    {onsubmit}
                >
                    <div class="form-group">
                        <label for="name">{"Name"}</label>
                        <input id="name" name="name" type="text" required=true />
                    </div>
                    <div class="form-group">
                        <label for="email">{"Email"}</label>
                        <input id="email" name="email" type="email" required=true />
                    </div>
                    <div class="form-group">
                        <label for="subject">{"Subject"}</label>
                        <input id="subject" name="subject" type="text" />
                    </div>
                    <div class="form-group">
                        <label for="message">{"Message"}</label>
                        <textarea id="message" name="message" rows="5" required=true />
                    </div>
                    <button class="btn btn-primary" type="submit" disabled={state.button_disabled}>
                        {state.button_label.clone()}
                    </button>
                    <div class={status_class} style={status_style} role="status">
                        {state.status_text()}
                    </div>
                </form>
            </div>
        </section>
    }
}
