//! `<video>` / `<img>` elements that feed the media source texture.

use crate::constants::{HAVE_CURRENT_DATA, MEDIA_CROSS_ORIGIN};
use ascii_core::{ParamEvent, ParamSender, SourceKind};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

pub enum MediaElement {
    Video(web::HtmlVideoElement),
    Image(web::HtmlImageElement),
}

pub struct MediaSource {
    element: MediaElement,
    url: String,
    uploaded: bool,
}

impl MediaSource {
    /// Create the element for `kind` and start loading `url`.
    ///
    /// The natural aspect is reported through `tx` once dimensions are known.
    pub fn load(
        document: &web::Document,
        kind: SourceKind,
        url: &str,
        tx: &ParamSender,
    ) -> anyhow::Result<Self> {
        let element = match kind {
            SourceKind::Video => MediaElement::Video(create_video(document, url, tx)?),
            SourceKind::Image => MediaElement::Image(create_image(document, url, tx)?),
            SourceKind::Wave => anyhow::bail!("wave is not a media source"),
        };
        log::info!("[media] loading {kind} from {url}");
        Ok(Self {
            element,
            url: url.to_string(),
            uploaded: false,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Pixel size of the current frame, once one is decodable.
    pub fn natural_size(&self) -> Option<(u32, u32)> {
        let (w, h) = match &self.element {
            MediaElement::Video(v) => {
                if v.ready_state() < HAVE_CURRENT_DATA {
                    return None;
                }
                (v.video_width(), v.video_height())
            }
            MediaElement::Image(img) => {
                if !img.complete() {
                    return None;
                }
                (img.natural_width(), img.natural_height())
            }
        };
        (w > 0 && h > 0).then_some((w, h))
    }

    /// Video refreshes every frame; a still image uploads once.
    pub fn take_frame(&mut self) -> Option<(wgpu::ExternalImageSource, u32, u32)> {
        let (w, h) = self.natural_size()?;
        match &self.element {
            MediaElement::Video(v) => Some((wgpu::ExternalImageSource::HTMLVideoElement(v.clone()), w, h)),
            MediaElement::Image(img) => {
                if self.uploaded {
                    return None;
                }
                self.uploaded = true;
                Some((wgpu::ExternalImageSource::HTMLImageElement(img.clone()), w, h))
            }
        }
    }

    /// Stop playback and detach the element from its URL.
    pub fn release(self) {
        match self.element {
            MediaElement::Video(v) => {
                _ = v.pause();
                _ = v.remove_attribute("src");
                v.load();
            }
            MediaElement::Image(img) => {
                _ = img.remove_attribute("src");
            }
        }
        log::info!("[media] released {}", self.url);
    }
}

fn create_video(
    document: &web::Document,
    url: &str,
    tx: &ParamSender,
) -> anyhow::Result<web::HtmlVideoElement> {
    let video: web::HtmlVideoElement = crate::dom::create(document, "video")?;
    video.set_muted(true);
    video.set_loop(true);
    video.set_autoplay(true);
    _ = video.set_attribute("playsinline", "");
    video.set_cross_origin(Some(MEDIA_CROSS_ORIGIN));

    let v = video.clone();
    let tx = tx.clone();
    crate::dom::add_event_listener(&video, "loadedmetadata", move |_| {
        let (w, h) = (v.video_width(), v.video_height());
        if h > 0 {
            log::info!("[media] video metadata {w}x{h}");
            _ = tx.send(ParamEvent::SourceAspect(w as f32 / h as f32));
        }
    });
    let v = video.clone();
    crate::dom::add_event_listener(&video, "error", move |_| {
        log::warn!("[media] video failed to load: {}", v.src());
    });

    video.set_src(url);
    play_with_retry(video.clone());
    Ok(video)
}

fn create_image(
    document: &web::Document,
    url: &str,
    tx: &ParamSender,
) -> anyhow::Result<web::HtmlImageElement> {
    let img: web::HtmlImageElement = crate::dom::create(document, "img")?;
    img.set_cross_origin(Some(MEDIA_CROSS_ORIGIN));

    let i = img.clone();
    let tx = tx.clone();
    crate::dom::add_event_listener(&img, "load", move |_| {
        let (w, h) = (i.natural_width(), i.natural_height());
        if h > 0 {
            log::info!("[media] image loaded {w}x{h}");
            _ = tx.send(ParamEvent::SourceAspect(w as f32 / h as f32));
        }
    });
    let i = img.clone();
    crate::dom::add_event_listener(&img, "error", move |_| {
        log::warn!("[media] image failed to load: {}", i.src());
    });

    img.set_src(url);
    Ok(img)
}

async fn try_play(video: &web::HtmlVideoElement) -> Result<(), JsValue> {
    let promise: js_sys::Promise = video.play()?;
    JsFuture::from(promise).await.map(|_| ())
}

fn play_with_retry(video: web::HtmlVideoElement) {
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = try_play(&video).await {
            log::info!("[media] autoplay blocked ({:?}); retrying on next interaction", e);
            arm_retry(video);
        }
    });
}

/// Retry playback once, on whichever of pointerdown / keydown comes first.
fn arm_retry(video: web::HtmlVideoElement) {
    let Some(window) = web::window() else {
        return;
    };
    let fired = Rc::new(Cell::new(false));
    for event in ["pointerdown", "keydown"] {
        let fired = fired.clone();
        let video = video.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::Event| {
            if fired.replace(true) {
                return;
            }
            let video = video.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = try_play(&video).await {
                    log::warn!("[media] playback still blocked: {:?}", e);
                }
            });
        }) as Box<dyn FnMut(_)>);
        let opts = web::AddEventListenerOptions::new();
        opts.set_once(true);
        _ = window.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().unchecked_ref(),
            &opts,
        );
        closure.forget();
    }
}
