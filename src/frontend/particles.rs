use std::cell::{Cell, RefCell};
use std::f64::consts::PI;
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_render::{request_animation_frame, AnimationFrame};
use serde_json::json;
use wasm_bindgen::JsCast;
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

use super::dom::{prefers_reduced_motion, viewport_size};
use crate::config::SiteConfig;
use crate::particles::{ParticleField, Surface};
use crate::telemetry::{log_event, LogLevel};

struct CanvasSurface<'a> {
    context: &'a CanvasRenderingContext2d,
}

impl Surface for CanvasSurface<'_> {
    fn clear(&mut self, width: f64, height: f64) {
        self.context.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_disc(&mut self, x: f64, y: f64, radius: f64, color: &str) {
        self.context.begin_path();
        let _ = self.context.arc(x, y, radius, 0.0, PI * 2.0);
        self.context.set_fill_style_str(color);
        self.context.fill();
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: &str) {
        self.context.begin_path();
        self.context.set_stroke_style_str(color);
        self.context.set_line_width(width);
        self.context.move_to(from.0, from.1);
        self.context.line_to(to.0, to.1);
        self.context.stroke();
    }
}

struct FieldLoop {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    field: RefCell<ParticleField>,
    frame: RefCell<Option<AnimationFrame>>,
    running: Cell<bool>,
}

impl FieldLoop {
    fn schedule(self: &Rc<Self>) {
        if !self.running.get() {
            return;
        }

        let field_loop = Rc::clone(self);
        let handle = request_animation_frame(move |_| {
            field_loop.frame.borrow_mut().take();
            field_loop.draw();
            field_loop.schedule();
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn draw(&self) {
        let mut surface = CanvasSurface {
            context: &self.context,
        };
        self.field.borrow_mut().render_frame(&mut surface);
    }

    fn resize(&self, width: f64, height: f64) {
        self.canvas.set_width(width.max(0.0) as u32);
        self.canvas.set_height(height.max(0.0) as u32);
        self.field.borrow_mut().resize(width, height);
    }

    fn stop(&self) {
        self.running.set(false);
        self.frame.borrow_mut().take();
    }
}

fn start_field(canvas: HtmlCanvasElement, config: &SiteConfig) -> Option<Rc<FieldLoop>> {
    let context = canvas
        .get_context("2d")
        .ok()
        .flatten()?
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()?;
    let (width, height) = viewport_size();
    let field = ParticleField::seed(
        width,
        height,
        config.particle_max,
        config.link_distance,
        js_sys::Math::random,
    );

    log_event(
        config,
        LogLevel::Debug,
        "particle_field_started",
        json!({ "particles": field.particles().len(), "width": width, "height": height }),
    );

    let field_loop = Rc::new(FieldLoop {
        canvas,
        context,
        field: RefCell::new(field),
        frame: RefCell::new(None),
        running: Cell::new(true),
    });
    field_loop.resize(width, height);
    field_loop.schedule();
    Some(field_loop)
}

#[derive(Properties, PartialEq)]
pub struct ParticleCanvasProps {
    pub config: Rc<SiteConfig>,
}

#[function_component(ParticleCanvas)]
pub fn particle_canvas(props: &ParticleCanvasProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        let config = props.config.clone();
        use_effect_with((), move |_| {
            let field_loop = if prefers_reduced_motion() {
                None
            } else {
                canvas_ref
                    .cast::<HtmlCanvasElement>()
                    .and_then(|canvas| start_field(canvas, &config))
            };

            let resize_listener = match (window(), field_loop.clone()) {
                (Some(win), Some(field_loop)) => Some(EventListener::new(&win, "resize", move |_| {
                    let (width, height) = viewport_size();
                    field_loop.resize(width, height);
                })),
                _ => None,
            };

            move || {
                drop(resize_listener);
                if let Some(field_loop) = field_loop {
                    field_loop.stop();
                }
            }
        });
    }

    html! {
        <div class="animated-bg" aria-hidden="true">
            <canvas
                ref={canvas_ref}
                class="particle-canvas"
                style="position: fixed; top: 0; left: 0; z-index: -1; opacity: 0.3; pointer-events: none;"
            />
        </div>
    }
}
