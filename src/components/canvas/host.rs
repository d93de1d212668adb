use std::cell::RefCell;
use std::rc::Rc;

use log::info;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::driver::{Engine, FrameDriver, Viewport};
use super::surface::Surface;

/// Why a background could not attach to its canvas.
///
/// None of these are fatal: the caller logs and leaves the page without the
/// decoration.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
	#[error("no global window")]
	NoWindow,
	#[error("no document element")]
	NoDocument,
	#[error("2d drawing context unavailable")]
	NoContext,
	#[error("javascript error: {0}")]
	Js(String),
}

impl From<JsValue> for HostError {
	fn from(value: JsValue) -> Self {
		HostError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}

/// How the canvas picks its size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Sizing {
	/// Fill the window; the document height is the content height.
	#[default]
	Window,
	/// Fill the canvas's parent element.
	Parent,
}

pub fn window() -> Result<Window, HostError> {
	web_sys::window().ok_or(HostError::NoWindow)
}

fn number(value: JsValue) -> f64 {
	value.as_f64().unwrap_or(0.0)
}

pub fn read_viewport(
	window: &Window,
	canvas: &HtmlCanvasElement,
	sizing: Sizing,
) -> Result<Viewport, HostError> {
	let pixel_ratio = window.device_pixel_ratio();
	let scroll_y = window.scroll_y().unwrap_or(0.0);
	let viewport = match sizing {
		Sizing::Window => {
			let root = window
				.document()
				.and_then(|d| d.document_element())
				.ok_or(HostError::NoDocument)?;
			let (width, height) = (number(window.inner_width()?), number(window.inner_height()?));
			Viewport {
				width,
				height,
				content_height: root.scroll_height() as f64,
				scroll_y,
				pixel_ratio,
			}
		}
		Sizing::Parent => {
			let (width, height) = canvas
				.parent_element()
				.map(|p| (p.client_width() as f64, p.client_height() as f64))
				.unwrap_or((800.0, 600.0));
			Viewport {
				width,
				height,
				content_height: height,
				scroll_y: 0.0,
				pixel_ratio,
			}
		}
	};
	Ok(viewport)
}

pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, HostError> {
	canvas
		.get_context("2d")?
		.ok_or(HostError::NoContext)?
		.dyn_into()
		.map_err(|_| HostError::NoContext)
}

/// A fresh seed for an engine's generator.
pub fn entropy_seed() -> u64 {
	(js_sys::Math::random() * u64::MAX as f64) as u64 ^ js_sys::Date::now() as u64
}

/// Bind `engine` to `canvas` and start its animation-frame loop.
///
/// The loop and the resize listener live for the lifetime of the page.
pub fn attach<E: Engine + 'static>(
	canvas: HtmlCanvasElement,
	engine: E,
	sizing: Sizing,
	resize_quiet_ms: f64,
) -> Result<(), HostError> {
	let window = window()?;
	let mut ctx = context_2d(&canvas)?;
	let viewport = read_viewport(&window, &canvas, sizing)?;
	ctx.resize(&viewport);

	let driver = Rc::new(RefCell::new(FrameDriver::new(engine, viewport, resize_quiet_ms)));
	info!(
		"canvas attached at {}x{} (ratio {})",
		viewport.width, viewport.height, viewport.pixel_ratio
	);

	let (driver_resize, canvas_resize) = (driver.clone(), canvas.clone());
	let on_resize: Closure<dyn FnMut()> = Closure::new(move || {
		let Ok(win) = self::window() else {
			return;
		};
		let now = win.performance().map(|p| p.now()).unwrap_or(0.0);
		if let Ok(viewport) = read_viewport(&win, &canvas_resize, sizing) {
			driver_resize.borrow_mut().request_resize(viewport, now);
		}
	});
	window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
	on_resize.forget();

	let animate: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
	let animate_inner = animate.clone();
	*animate.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
		let Ok(win) = self::window() else {
			return;
		};
		{
			let mut driver = driver.borrow_mut();
			if sizing == Sizing::Window {
				driver.set_scroll(win.scroll_y().unwrap_or(0.0));
			}
			driver.frame(timestamp, &mut ctx);
		}
		if let Some(ref cb) = *animate_inner.borrow() {
			let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	}));
	if let Some(ref cb) = *animate.borrow() {
		window.request_animation_frame(cb.as_ref().unchecked_ref())?;
	}
	Ok(())
}
