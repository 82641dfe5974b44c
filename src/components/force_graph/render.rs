use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{LayoutEngine, ViewTransform};

fn set_view(ctx: &CanvasRenderingContext2d, t: &ViewTransform) {
	let _ = ctx.set_transform(t.k, 0.0, 0.0, t.k, t.x, t.y);
}

pub fn render(state: &LayoutEngine, ctx: &CanvasRenderingContext2d, background: &str) {
	let _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
	ctx.set_fill_style_str(background);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_edges(state, ctx);
	draw_exiting(state, ctx);
	draw_nodes(state, ctx);
	draw_hover_label(state, ctx);
	let _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
}

fn draw_edges(state: &LayoutEngine, ctx: &CanvasRenderingContext2d) {
	state.graph.visit_edges(|n1, n2, _| {
		let (a, b) = (&n1.data.user_data.id, &n2.data.user_data.id);
		let visual = state
			.links
			.get(&(a.clone(), b.clone()))
			.or_else(|| state.links.get(&(b.clone(), a.clone())));
		let Some(visual) = visual else {
			return;
		};

		set_view(ctx, &visual.transform);
		ctx.set_stroke_style_str(visual.stroke);
		ctx.set_line_width(1.5 / visual.transform.k);
		ctx.begin_path();
		ctx.move_to(n1.x() as f64, n1.y() as f64);
		ctx.line_to(n2.x() as f64, n2.y() as f64);
		ctx.stroke();
	});
}

fn draw_exiting(state: &LayoutEngine, ctx: &CanvasRenderingContext2d) {
	for node in &state.exiting {
		let radius = node.radius.value();
		if radius <= 0.0 {
			continue;
		}
		set_view(ctx, &node.transform);
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&node.fill());
		ctx.fill();
	}
}

fn draw_nodes(state: &LayoutEngine, ctx: &CanvasRenderingContext2d) {
	state.graph.visit_nodes(|node| {
		let Some(visual) = state.nodes.get(&node.data.user_data.id) else {
			return;
		};
		let radius = visual.radius.value();
		if radius <= 0.0 {
			return;
		}
		set_view(ctx, &visual.transform);
		ctx.begin_path();
		let _ = ctx.arc(node.x() as f64, node.y() as f64, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(visual.fill);
		ctx.fill();
	});
}

/// Path of the hovered node, drawn beside it.
fn draw_hover_label(state: &LayoutEngine, ctx: &CanvasRenderingContext2d) {
	let Some(id) = state.hover.as_deref() else {
		return;
	};
	let (Some((x, y)), Some(visual)) = (state.node_position(id), state.nodes.get(id)) else {
		return;
	};
	let k = visual.transform.k;
	let (sx, sy) = visual.transform.apply(x as f64, y as f64);
	let _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
	ctx.set_font("12px sans-serif");
	let metrics_width = ctx.measure_text(id).map(|m| m.width()).unwrap_or(0.0);
	let (lx, ly) = (sx + visual.radius.value() * k + 4.0, sy + 4.0);
	ctx.set_fill_style_str("rgba(0, 0, 0, 0.65)");
	ctx.fill_rect(lx - 3.0, ly - 12.0, metrics_width + 6.0, 16.0);
	ctx.set_fill_style_str("white");
	let _ = ctx.fill_text(id, lx, ly);
}
