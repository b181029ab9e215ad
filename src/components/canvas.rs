//! The drawing operations the widgets need from a host canvas.

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke<'a> {
	pub color: &'a str,
	pub width: f64,
	pub dash: &'a [f64],
}

impl<'a> Stroke<'a> {
	pub fn solid(color: &'a str, width: f64) -> Self {
		Self {
			color,
			width,
			dash: &[],
		}
	}
}

pub trait Surface {
	type Image;

	/// Clear to transparent.
	fn clear(&self, width: f64, height: f64);
	fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64, color: &str);
	fn save(&self);
	fn restore(&self);
	/// Translate, then scale, then rotate (radians) the current transform.
	fn transform(&self, tx: f64, ty: f64, scale: f64, rotation: f64);
	fn line(&self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: Stroke<'_>);
	fn fill_circle(&self, x: f64, y: f64, r: f64, color: &str);
	fn stroke_circle(&self, x: f64, y: f64, r: f64, stroke: Stroke<'_>);
	fn text(&self, text: &str, x: f64, y: f64, size: f64, color: &str);
	/// Draw `image` cover-fitted into the circle, at the given opacity.
	fn circle_image(&self, image: &Self::Image, x: f64, y: f64, r: f64, alpha: f64);
}

fn dash_array(dash: &[f64]) -> js_sys::Array {
	dash.iter().copied().map(JsValue::from_f64).collect()
}

impl Surface for CanvasRenderingContext2d {
	type Image = HtmlImageElement;

	fn clear(&self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_rect(&self, x: f64, y: f64, w: f64, h: f64, color: &str) {
		self.set_fill_style_str(color);
		CanvasRenderingContext2d::fill_rect(self, x, y, w, h);
	}

	fn save(&self) {
		CanvasRenderingContext2d::save(self);
	}

	fn restore(&self) {
		CanvasRenderingContext2d::restore(self);
	}

	fn transform(&self, tx: f64, ty: f64, scale: f64, rotation: f64) {
		let _ = self.translate(tx, ty);
		let _ = self.scale(scale, scale);
		if rotation != 0.0 {
			let _ = self.rotate(rotation);
		}
	}

	fn line(&self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: Stroke<'_>) {
		self.set_stroke_style_str(stroke.color);
		self.set_line_width(stroke.width);
		let _ = self.set_line_dash(&dash_array(stroke.dash));
		self.begin_path();
		self.move_to(x1, y1);
		self.line_to(x2, y2);
		self.stroke();
		let _ = self.set_line_dash(&js_sys::Array::new());
	}

	fn fill_circle(&self, x: f64, y: f64, r: f64, color: &str) {
		self.begin_path();
		let _ = self.arc(x, y, r.max(0.0), 0.0, TAU);
		self.set_fill_style_str(color);
		self.fill();
	}

	fn stroke_circle(&self, x: f64, y: f64, r: f64, stroke: Stroke<'_>) {
		self.set_stroke_style_str(stroke.color);
		self.set_line_width(stroke.width);
		let _ = self.set_line_dash(&dash_array(stroke.dash));
		self.begin_path();
		let _ = self.arc(x, y, r.max(0.0), 0.0, TAU);
		self.stroke();
		let _ = self.set_line_dash(&js_sys::Array::new());
	}

	fn text(&self, text: &str, x: f64, y: f64, size: f64, color: &str) {
		self.set_fill_style_str(color);
		self.set_font(&format!("{size}px sans-serif"));
		self.set_text_align("center");
		self.set_text_baseline("middle");
		let _ = self.fill_text(text, x, y);
	}

	fn circle_image(&self, image: &HtmlImageElement, x: f64, y: f64, r: f64, alpha: f64) {
		let (iw, ih) = (
			image.natural_width().max(1) as f64,
			image.natural_height().max(1) as f64,
		);
		let size = r * 2.0;
		let aspect = iw / ih;
		let (dw, dh) = if aspect > 1.0 {
			(size * aspect, size)
		} else {
			(size, size / aspect)
		};
		CanvasRenderingContext2d::save(self);
		self.begin_path();
		let _ = self.arc(x, y, r, 0.0, TAU);
		self.clip();
		self.set_global_alpha(alpha);
		let _ = self.draw_image_with_html_image_element_and_dw_and_dh(
			image,
			x - dw / 2.0,
			y - dh / 2.0,
			dw,
			dh,
		);
		self.set_global_alpha(1.0);
		CanvasRenderingContext2d::restore(self);
	}
}

#[cfg(test)]
pub(crate) mod testing {
	use std::cell::RefCell;

	use super::{Stroke, Surface};

	#[derive(Clone, Debug, PartialEq)]
	pub enum Op {
		Clear,
		Rect(String),
		Save,
		Restore,
		Transform(f64, f64, f64, f64),
		Line {
			from: (f64, f64),
			to: (f64, f64),
			color: String,
			dashed: bool,
		},
		Disc((f64, f64), f64, String),
		Ring((f64, f64), f64, String),
		Text(String, (f64, f64)),
		Image(&'static str, (f64, f64), f64),
	}

	/// Records every call; images are named by a static label.
	#[derive(Default)]
	pub struct Recorder {
		pub ops: RefCell<Vec<Op>>,
	}

	impl Recorder {
		pub fn ops(&self) -> Vec<Op> {
			self.ops.borrow().clone()
		}

		fn push(&self, op: Op) {
			self.ops.borrow_mut().push(op);
		}
	}

	impl Surface for Recorder {
		type Image = &'static str;

		fn clear(&self, _: f64, _: f64) {
			self.push(Op::Clear);
		}

		fn fill_rect(&self, _: f64, _: f64, _: f64, _: f64, color: &str) {
			self.push(Op::Rect(color.into()));
		}

		fn save(&self) {
			self.push(Op::Save);
		}

		fn restore(&self) {
			self.push(Op::Restore);
		}

		fn transform(&self, tx: f64, ty: f64, scale: f64, rotation: f64) {
			self.push(Op::Transform(tx, ty, scale, rotation));
		}

		fn line(&self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: Stroke<'_>) {
			self.push(Op::Line {
				from: (x1, y1),
				to: (x2, y2),
				color: stroke.color.into(),
				dashed: !stroke.dash.is_empty(),
			});
		}

		fn fill_circle(&self, x: f64, y: f64, r: f64, color: &str) {
			self.push(Op::Disc((x, y), r, color.into()));
		}

		fn stroke_circle(&self, x: f64, y: f64, r: f64, stroke: Stroke<'_>) {
			self.push(Op::Ring((x, y), r, stroke.color.into()));
		}

		fn text(&self, text: &str, x: f64, y: f64, _: f64, _: &str) {
			self.push(Op::Text(text.into(), (x, y)));
		}

		fn circle_image(&self, image: &&'static str, x: f64, y: f64, _: f64, alpha: f64) {
			self.push(Op::Image(*image, (x, y), alpha));
		}
	}
}
