use std::cmp::Ordering;
use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::camera::Projected;
use super::state::ForceGraphState;

const BACKGROUND: &str = "#000011";
const LINK_COLOR: &str = "rgba(255, 255, 255, 0.2)";
const PARTICLE_COLOR: &str = "rgba(255, 255, 255, 0.9)";
const HIGHLIGHT_RING: &str = "rgba(255, 255, 255, 0.8)";
const NODE_OPACITY: f64 = 0.75;
const LABEL_FONT: &str = "12px sans-serif";

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (w, h) = (state.camera.width, state.camera.height);
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, w, h);

	let projected: Vec<Option<Projected>> = (0..state.index.node_count())
		.map(|node| state.project_node(node))
		.collect();

	draw_links(state, ctx, &projected);
	draw_particles(state, ctx);
	draw_nodes(state, ctx, &projected);
}

fn draw_links(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, projected: &[Option<Projected>]) {
	ctx.set_stroke_style_str(LINK_COLOR);
	for link in state.index.links() {
		let (Some(a), Some(b)) = (projected[link.source], projected[link.target]) else {
			continue;
		};
		ctx.set_line_width(((a.scale + b.scale) / 2.0).max(1.0));
		ctx.begin_path();
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
		ctx.stroke();
	}
}

/// Particles run source -> target, spaced evenly along each link.
fn draw_particles(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let count = state.settings.particles_per_link;
	if count == 0 {
		return;
	}
	ctx.set_fill_style_str(PARTICLE_COLOR);
	for (li, link) in state.index.links().iter().enumerate() {
		let width = state.particle_width(li);
		if width <= 0.0 {
			continue;
		}
		let (from, to) = (state.sim.position(link.source), state.sim.position(link.target));
		for k in 0..count {
			let t = (state.particle_t + k as f64 / count as f64).fract();
			let Some(p) = state.camera.project(from.lerp(to, t)) else {
				continue;
			};
			ctx.begin_path();
			let _ = ctx.arc(p.x, p.y, (width / 2.0 * p.scale).max(1.0), 0.0, 2.0 * PI);
			ctx.fill();
		}
	}
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d, projected: &[Option<Projected>]) {
	// Far to near, so closer spheres cover farther ones.
	let mut order: Vec<(usize, Projected)> = projected
		.iter()
		.enumerate()
		.filter_map(|(node, p)| p.map(|p| (node, p)))
		.collect();
	order.sort_by(|a, b| b.1.depth.partial_cmp(&a.1.depth).unwrap_or(Ordering::Equal));

	ctx.set_global_alpha(NODE_OPACITY);
	for &(node, p) in &order {
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, state.radii[node] * p.scale, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&state.colors[node]);
		ctx.fill();
	}
	ctx.set_global_alpha(1.0);

	let highlight = state.highlight();
	if !highlight.is_empty() {
		ctx.set_stroke_style_str(HIGHLIGHT_RING);
		ctx.set_line_width(1.5);
		for &(node, p) in order.iter().filter(|(node, _)| highlight.contains_node(*node)) {
			ctx.begin_path();
			let _ = ctx.arc(p.x, p.y, state.radii[node] * p.scale + 2.0, 0.0, 2.0 * PI);
			ctx.stroke();
		}
	}

	// Labels sit in screen space on top of every sphere.
	ctx.set_font(LABEL_FONT);
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	for &(node, p) in &order {
		ctx.set_fill_style_str(&state.colors[node]);
		let _ = ctx.fill_text(state.index.id(node), p.x, p.y);
	}
}
