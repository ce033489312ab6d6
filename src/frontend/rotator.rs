use std::rc::Rc;

use gloo_timers::callback::Interval;
use yew::prelude::*;

use crate::config::SiteConfig;
use crate::content::{BadgeText, Quote};
use crate::rotator::{BadgeRotation, QuoteCycle, TypingEffect, TypingTimings};

#[derive(Properties, PartialEq)]
pub struct BadgeProps {
    pub badges: Rc<Vec<BadgeText>>,
    pub config: Rc<SiteConfig>,
}

#[function_component(TypingBadge)]
pub fn typing_badge(props: &BadgeProps) -> Html {
    let displayed = use_state(String::new);

    {
        let displayed = displayed.clone();
        let timings = TypingTimings {
            speed_ms: props.config.typing_speed_ms,
            pause_ms: props.config.typing_pause_ms,
            restart_ms: props.config.typing_restart_ms,
        };
        use_effect_with(props.badges.clone(), move |badges| {
            let texts: Vec<String> = badges.iter().map(|badge| badge.text.clone()).collect();
            let interval = TypingEffect::new(&texts, timings).map(move |mut effect| {
                effect.advance(0);
                displayed.set(effect.displayed());

                let tick_ms = timings.tick_ms();
                Interval::new(tick_ms, move || {
                    if effect.advance(tick_ms) {
                        displayed.set(effect.displayed());
                    }
                })
            });

            move || drop(interval)
        });
    }

    html! {
        <div class="hero-badge">
            <span class="pulse-dot"></span>
            <span class="badge-text">{(*displayed).clone()}</span>
            <span class="typing-cursor" aria-hidden="true">{"|"}</span>
        </div>
    }
}

#[function_component(ColorBadge)]
pub fn color_badge(props: &BadgeProps) -> Html {
    let rotation = {
        let badges = props.badges.clone();
        let config = props.config.clone();
        use_mut_ref(move || BadgeRotation::new(&badges, config.badge_interval_ms, config.badge_fade_ms))
    };
    let view = use_state(|| rotation.borrow().as_ref().map(|rotation| rotation.view().clone()));

    {
        let rotation = rotation.clone();
        let view = view.clone();
        let tick_ms = props.config.badge_fade_ms.max(1);
        use_effect_with((), move |_| {
            let active = rotation.borrow().is_some();
            let interval = active.then(move || {
                let advance = move |elapsed_ms: u32| {
                    if let Some(rotation) = rotation.borrow_mut().as_mut() {
                        if rotation.advance(elapsed_ms) {
                            view.set(Some(rotation.view().clone()));
                        }
                    }
                };
                advance(0);
                Interval::new(tick_ms, move || advance(tick_ms))
            });

            move || drop(interval)
        });
    }

    let Some(current) = (*view).clone() else {
        return html! {};
    };

    let badge_style = format!(
        "opacity: {}; transition: opacity 0.3s ease;{}",
        if current.visible { "1" } else { "0" },
        current
            .border_color
            .as_deref()
            .map(|color| format!(" border-color: {color};"))
            .unwrap_or_default()
    );
    let dot_style = current
        .dot_color
        .as_deref()
        .map(|color| format!("background-color: {color};"))
        .unwrap_or_default();

    html! {
        <div class="hero-badge" style={badge_style}>
            <span class="pulse-dot" style={dot_style}></span>
            <span class="badge-text">{current.text}</span>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct QuoteRotatorProps {
    pub quotes: Rc<Vec<Quote>>,
    pub interval_ms: u32,
}

#[function_component(QuoteRotator)]
pub fn quote_rotator(props: &QuoteRotatorProps) -> Html {
    let active = use_state(|| 0usize);

    {
        let active = active.clone();
        let interval_ms = props.interval_ms;
        use_effect_with(props.quotes.len(), move |len| {
            let interval = QuoteCycle::new(*len).map(move |mut cycle| {
                Interval::new(interval_ms, move || active.set(cycle.advance()))
            });

            move || drop(interval)
        });
    }

    if props.quotes.is_empty() {
        return html! {};
    }

    html! {
        <div class="quotes">
            { for props.quotes.iter().enumerate().map(|(index, quote)| html! {
                <blockquote class={classes!("quote", (index == *active).then_some("active"))}>
                    <p>{format!("\u{201c}{}\u{201d}", quote.text)}</p>
                    <cite>{format!("\u{2014} {}", quote.author)}</cite>
                </blockquote>
            }) }
        </div>
    }
}
