use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::driver::Viewport;

/// An sRGB color without alpha; alpha is supplied per draw call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
	pub r: u8,
	pub g: u8,
	pub b: u8,
}

impl Rgb {
	pub const WHITE: Rgb = Rgb::new(255, 255, 255);

	pub const fn new(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b }
	}

	pub fn rgba(self, alpha: f64) -> String {
		format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha.clamp(0.0, 1.0))
	}

	/// Channel-wise interpolation, `t = 0` is `self`.
	pub fn mix(self, other: Rgb, t: f64) -> Rgb {
		let t = t.clamp(0.0, 1.0);
		let ch = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
		Rgb::new(ch(self.r, other.r), ch(self.g, other.g), ch(self.b, other.b))
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
	pub offset: f64,
	pub color: Rgb,
	pub alpha: f64,
}

impl ColorStop {
	pub fn new(offset: f64, color: Rgb, alpha: f64) -> Self {
		Self {
			offset,
			color,
			alpha,
		}
	}
}

/// Fill or stroke style of a single primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
	Solid {
		color: Rgb,
		alpha: f64,
	},
	Linear {
		from: (f64, f64),
		to: (f64, f64),
		stops: [ColorStop; 2],
	},
	Radial {
		center: (f64, f64),
		inner: f64,
		outer: f64,
		stops: [ColorStop; 2],
	},
}

impl Paint {
	pub fn solid(color: Rgb, alpha: f64) -> Self {
		Paint::Solid { color, alpha }
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineCap {
	Butt,
	Round,
}

/// The 2D raster operations both engines draw with.
///
/// Coordinates are in device-independent pixels; `set_scale` maps them onto
/// the backing store.
pub trait Surface {
	/// Resize the backing store for `viewport`, keeping the CSS size in
	/// device-independent pixels.
	fn resize(&mut self, viewport: &Viewport);
	fn set_scale(&mut self, scale: f64);
	fn clear(&mut self, width: f64, height: f64);
	fn save(&mut self);
	fn restore(&mut self);
	fn translate(&mut self, dx: f64, dy: f64);
	fn set_global_alpha(&mut self, alpha: f64);
	fn set_line_width(&mut self, width: f64);
	fn set_line_cap(&mut self, cap: LineCap);
	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), paint: &Paint);
	fn stroke_circle(&mut self, center: (f64, f64), radius: f64, paint: &Paint);
	fn fill_circle(&mut self, center: (f64, f64), radius: f64, paint: &Paint);
}

fn canvas_style(ctx: &CanvasRenderingContext2d, paint: &Paint) -> Option<JsValue> {
	match *paint {
		Paint::Solid { color, alpha } => Some(JsValue::from_str(&color.rgba(alpha))),
		Paint::Linear { from, to, stops } => {
			let gradient = ctx.create_linear_gradient(from.0, from.1, to.0, to.1);
			for stop in stops {
				let _ = gradient.add_color_stop(stop.offset as f32, &stop.color.rgba(stop.alpha));
			}
			Some(gradient.into())
		}
		Paint::Radial {
			center,
			inner,
			outer,
			stops,
		} => {
			let gradient = ctx
				.create_radial_gradient(center.0, center.1, inner, center.0, center.1, outer)
				.ok()?;
			for stop in stops {
				let _ = gradient.add_color_stop(stop.offset as f32, &stop.color.rgba(stop.alpha));
			}
			Some(gradient.into())
		}
	}
}

impl Surface for CanvasRenderingContext2d {
	fn resize(&mut self, viewport: &Viewport) {
		let Some(canvas) = self.canvas() else {
			return;
		};
		resize_canvas(&canvas, viewport);
	}

	fn set_scale(&mut self, scale: f64) {
		let _ = self.set_transform(scale, 0.0, 0.0, scale, 0.0, 0.0);
	}

	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn save(&mut self) {
		CanvasRenderingContext2d::save(self);
	}

	fn restore(&mut self) {
		CanvasRenderingContext2d::restore(self);
	}

	fn translate(&mut self, dx: f64, dy: f64) {
		let _ = CanvasRenderingContext2d::translate(self, dx, dy);
	}

	fn set_global_alpha(&mut self, alpha: f64) {
		CanvasRenderingContext2d::set_global_alpha(self, alpha);
	}

	fn set_line_width(&mut self, width: f64) {
		CanvasRenderingContext2d::set_line_width(self, width);
	}

	fn set_line_cap(&mut self, cap: LineCap) {
		CanvasRenderingContext2d::set_line_cap(
			self,
			match cap {
				LineCap::Butt => "butt",
				LineCap::Round => "round",
			},
		);
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), paint: &Paint) {
		let Some(style) = canvas_style(self, paint) else {
			return;
		};
		#[allow(deprecated)]
		self.set_stroke_style(&style);
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.stroke();
	}

	fn stroke_circle(&mut self, center: (f64, f64), radius: f64, paint: &Paint) {
		let Some(style) = canvas_style(self, paint) else {
			return;
		};
		#[allow(deprecated)]
		self.set_stroke_style(&style);
		self.begin_path();
		let _ = self.arc(center.0, center.1, radius, 0.0, 2.0 * PI);
		self.stroke();
	}

	fn fill_circle(&mut self, center: (f64, f64), radius: f64, paint: &Paint) {
		let Some(style) = canvas_style(self, paint) else {
			return;
		};
		#[allow(deprecated)]
		self.set_fill_style(&style);
		self.begin_path();
		let _ = self.arc(center.0, center.1, radius, 0.0, 2.0 * PI);
		self.fill();
	}
}

/// Size the backing store to `viewport * pixel_ratio`, CSS size to the viewport.
pub fn resize_canvas(canvas: &HtmlCanvasElement, viewport: &Viewport) {
	let ratio = viewport.pixel_ratio.max(1.0);
	canvas.set_width((viewport.width * ratio).max(0.0) as u32);
	canvas.set_height((viewport.height * ratio).max(0.0) as u32);
	let style = canvas.style();
	let _ = style.set_property("width", &format!("{}px", viewport.width));
	let _ = style.set_property("height", &format!("{}px", viewport.height));
}


#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rgba_formats_like_css() {
		assert_eq!(Rgb::new(124, 92, 252).rgba(0.5), "rgba(124, 92, 252, 0.5)");
		assert_eq!(Rgb::WHITE.rgba(2.0), "rgba(255, 255, 255, 1)");
	}

	#[test]
	fn mix_hits_both_ends() {
		let (a, b) = (Rgb::new(0, 100, 200), Rgb::new(200, 100, 0));
		assert_eq!(a.mix(b, 0.0), a);
		assert_eq!(a.mix(b, 1.0), b);
		assert_eq!(a.mix(b, 0.5), Rgb::new(100, 100, 100));
	}
}
