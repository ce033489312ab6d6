use js_sys::{Object, Reflect};
use wasm_bindgen::{closure::Closure, prelude::wasm_bindgen, JsValue};
use web_sys::window;

use super::dom;
use crate::error::SiteError;
use crate::media;

const IFRAME_API_SRC: &str = "https://www.youtube.com/iframe_api";
const READY_HOOK: &str = "onYouTubeIframeAPIReady";
const STATE_PLAYING: i32 = 1;
const STATE_BUFFERING: i32 = 3;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = YT)]
    #[derive(Clone, Debug)]
    pub type Player;

    #[wasm_bindgen(constructor, js_namespace = YT, catch)]
    fn new(element_id: &str, options: &JsValue) -> Result<Player, JsValue>;

    #[wasm_bindgen(method, js_name = getDuration)]
    fn get_duration(this: &Player) -> f64;

    #[wasm_bindgen(method, js_name = getCurrentTime)]
    fn get_current_time(this: &Player) -> f64;

    #[wasm_bindgen(method, js_name = getPlayerState)]
    fn get_player_state(this: &Player) -> i32;

    #[wasm_bindgen(method, js_name = seekTo)]
    fn seek_to(this: &Player, seconds: f64, allow_seek_ahead: bool);

    #[wasm_bindgen(method, js_name = playVideo)]
    fn play_video(this: &Player);

    #[wasm_bindgen(method, js_name = pauseVideo)]
    fn pause_video(this: &Player);

    #[wasm_bindgen(method)]
    fn mute(this: &Player);

    #[wasm_bindgen(method, js_name = unMute)]
    fn un_mute(this: &Player);

    #[wasm_bindgen(method)]
    fn destroy(this: &Player);
}

impl media::Player for Player {
    fn is_paused(&self) -> bool {
        !matches!(self.get_player_state(), STATE_PLAYING | STATE_BUFFERING)
    }

    fn play(&self) {
        self.play_video();
    }

    fn pause(&self) {
        self.pause_video();
    }

    fn set_muted(&self, muted: bool) {
        if muted {
            self.mute();
        } else {
            self.un_mute();
        }
    }

    fn seek_to(&self, seconds: f64) {
        Player::seek_to(self, seconds, true);
    }

    fn current_time(&self) -> f64 {
        self.get_current_time()
    }

    fn duration(&self) -> f64 {
        self.get_duration()
    }
}

fn api_loaded() -> bool {
    window()
        .and_then(|win| Reflect::get(&win, &JsValue::from_str("YT")).ok())
        .and_then(|yt| dom::method(&yt, "Player"))
        .is_some()
}

/// Runs `on_ready` once the IFrame API is available, injecting its script if needed.
pub fn load_iframe_api(on_ready: impl FnOnce() + 'static) -> Result<(), SiteError> {
    if api_loaded() {
        on_ready();
        return Ok(());
    }

    let win = window().ok_or_else(|| SiteError::MissingElement("window".to_string()))?;
    let previous_hook = dom::method(&win, READY_HOOK);
    let hook = Closure::once_into_js(move || {
        if let Some(previous_hook) = previous_hook {
            let _ = previous_hook.call0(&JsValue::NULL);
        }
        on_ready();
    });
    Reflect::set(&win, &JsValue::from_str(READY_HOOK), &hook)?;

    let document = dom::document().ok_or_else(|| SiteError::MissingElement("document".to_string()))?;
    if document
        .query_selector(&format!("script[src=\"{IFRAME_API_SRC}\"]"))?
        .is_none()
    {
        let script = document.create_element("script")?;
        script.set_attribute("src", IFRAME_API_SRC)?;
        let body = document
            .body()
            .ok_or_else(|| SiteError::MissingElement("body".to_string()))?;
        body.append_child(&script)?;
    }

    Ok(())
}

pub struct PlayerEvents {
    pub on_ready: Box<dyn FnMut()>,
    pub on_state_change: Box<dyn FnMut(i32)>,
    pub on_error: Box<dyn FnMut(i32)>,
}

/// A live player plus the callbacks it was created with. Dropping it tears the
/// player down and releases the callbacks.
pub struct PlayerBinding {
    player: Player,
    _callbacks: Vec<Closure<dyn FnMut(JsValue)>>,
}

impl PlayerBinding {
    pub fn player(&self) -> &Player {
        &self.player
    }
}

impl Drop for PlayerBinding {
    fn drop(&mut self) {
        self.player.destroy();
    }
}

fn event_code(event: &JsValue) -> i32 {
    Reflect::get(event, &JsValue::from_str("data"))
        .ok()
        .and_then(|data| data.as_f64())
        .map(|code| code as i32)
        .unwrap_or(-1)
}

pub fn bind_player(element_id: &str, events: PlayerEvents) -> Result<PlayerBinding, SiteError> {
    let PlayerEvents {
        mut on_ready,
        mut on_state_change,
        mut on_error,
    } = events;

    let ready = Closure::<dyn FnMut(JsValue)>::new(move |_event: JsValue| on_ready());
    let state_change =
        Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| on_state_change(event_code(&event)));
    let error = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| on_error(event_code(&event)));

    let handlers = Object::new();
    Reflect::set(&handlers, &JsValue::from_str("onReady"), ready.as_ref())?;
    Reflect::set(&handlers, &JsValue::from_str("onStateChange"), state_change.as_ref())?;
    Reflect::set(&handlers, &JsValue::from_str("onError"), error.as_ref())?;

    let options = Object::new();
    Reflect::set(&options, &JsValue::from_str("events"), &handlers)?;

    let player = Player::new(element_id, &options)?;

    Ok(PlayerBinding {
        player,
        _callbacks: vec![ready, state_change, error],
    })
}
