//! Push channel: the WebSocket a running task reports progress on.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CloseEvent, MessageEvent, WebSocket};
use yew::Callback;

/// Where the app keeps its one push channel.
pub type ChannelSlot = Rc<RefCell<Option<PushChannel>>>;

/// Callbacks fired by a [`PushChannel`].
pub struct PushHandlers {
    pub on_open: Callback<()>,
    /// Text frames, undecoded.
    pub on_message: Callback<String>,
    pub on_error: Callback<()>,
    pub on_close: Callback<()>,
}

/// An open push channel.
///
/// Handlers are detached before the socket is closed, so once
/// [`PushChannel::close`] has run (or the channel is dropped) no further
/// callbacks fire.
pub struct PushChannel {
    socket: WebSocket,
    task_id: String,
    _on_open: Closure<dyn FnMut(web_sys::Event)>,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
    _on_error: Closure<dyn FnMut(web_sys::Event)>,
    _on_close: Closure<dyn FnMut(CloseEvent)>,
}

impl PushChannel {
    pub fn connect(url: &str, task_id: &str, handlers: PushHandlers) -> Result<Self, JsValue> {
        let socket = WebSocket::new(url)?;

        let PushHandlers {
            on_open,
            on_message,
            on_error,
            on_close,
        } = handlers;

        let on_open = Closure::wrap(Box::new(move |_: web_sys::Event| {
            on_open.emit(());
        }) as Box<dyn FnMut(_)>);

        let on_message = Closure::wrap(Box::new(move |e: MessageEvent| {
            // Binary frames are not part of the protocol.
            if let Some(text) = e.data().as_string() {
                on_message.emit(text);
            }
        }) as Box<dyn FnMut(_)>);

        let on_error = Closure::wrap(Box::new(move |_: web_sys::Event| {
            on_error.emit(());
        }) as Box<dyn FnMut(_)>);

        let on_close = Closure::wrap(Box::new(move |_: CloseEvent| {
            on_close.emit(());
        }) as Box<dyn FnMut(_)>);

        socket.set_onopen(Some(on_open.as_ref().unchecked_ref()));
        socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
        socket.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));

        Ok(Self {
            socket,
            task_id: task_id.to_string(),
            _on_open: on_open,
            _on_message: on_message,
            _on_error: on_error,
            _on_close: on_close,
        })
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Detach handlers and close the socket. Safe to call more than once.
    pub fn close(&self) {
        self.socket.set_onopen(None);
        self.socket.set_onmessage(None);
        self.socket.set_onerror(None);
        self.socket.set_onclose(None);

        let state = self.socket.ready_state();
        if state == WebSocket::CONNECTING || state == WebSocket::OPEN {
            let _ = self.socket.close();
        }
    }
}

impl Drop for PushChannel {
    fn drop(&mut self) {
        self.close();
    }
}

/// Close and remove the channel held in `slot`, returning its task id.
pub fn release(slot: &ChannelSlot) -> Option<String> {
    let channel = slot.borrow_mut().take()?;
    channel.close();
    Some(channel.task_id().to_string())
}

/// Put `channel` in `slot`, closing the one it replaces.
pub fn install(slot: &ChannelSlot, channel: PushChannel) {
    release(slot);
    *slot.borrow_mut() = Some(channel);
}
