use spinwave_core::pulse::Glow;
use spinwave_core::FramePlan;
use web_sys::{CanvasGradient, CanvasRenderingContext2d};

const PEAK_CAP_COLOR: &str = "white";

fn rgb(c: [u8; 3]) -> String {
    format!("rgb({}, {}, {})", c[0], c[1], c[2])
}

fn rgba(c: [u8; 3], a: f64) -> String {
    format!("rgba({}, {}, {}, {})", c[0], c[1], c[2], a)
}

/// Draw bars, peak caps and glow for one frame.
pub fn draw_frame(ctx: &CanvasRenderingContext2d, plan: &FramePlan) {
    let w = plan.surface.width;
    let h = plan.surface.height;
    ctx.clear_rect(0.0, 0.0, w, h);
    if plan.surface.is_empty() {
        return;
    }

    for bar in &plan.bars {
        if bar.height > 0.0 {
            ctx.set_fill_style_str(&rgb(bar.color));
            ctx.fill_rect(bar.x, h - bar.height, bar.width, bar.height);
        }
        ctx.set_fill_style_str(PEAK_CAP_COLOR);
        ctx.fill_rect(bar.x, h - bar.peak, bar.width, plan.cap_height);
    }

    if let Some(glow) = &plan.glow {
        draw_glow(ctx, glow, w, h);
    }
}

fn edge_gradient(
    ctx: &CanvasRenderingContext2d,
    from: (f64, f64),
    to: (f64, f64),
    color: [u8; 3],
) -> CanvasGradient {
    let g = ctx.create_linear_gradient(from.0, from.1, to.0, to.1);
    let _ = g.add_color_stop(0.0, &rgba(color, 1.0));
    let _ = g.add_color_stop(1.0, &rgba(color, 0.0));
    g
}

/// Four edge gradients fading inwards from the accent colour.
fn draw_glow(ctx: &CanvasRenderingContext2d, glow: &Glow, w: f64, h: f64) {
    let span = glow.span;
    if span <= 0.0 {
        return;
    }
    ctx.save();
    ctx.set_global_alpha(glow.alpha);

    let left = edge_gradient(ctx, (0.0, 0.0), (span, 0.0), glow.color);
    ctx.set_fill_style_canvas_gradient(&left);
    ctx.fill_rect(0.0, 0.0, span, h);

    let right = edge_gradient(ctx, (w, 0.0), (w - span, 0.0), glow.color);
    ctx.set_fill_style_canvas_gradient(&right);
    ctx.fill_rect(w - span, 0.0, span, h);

    let top = edge_gradient(ctx, (0.0, 0.0), (0.0, span), glow.color);
    ctx.set_fill_style_canvas_gradient(&top);
    ctx.fill_rect(0.0, 0.0, w, span);

    let bottom = edge_gradient(ctx, (0.0, h), (0.0, h - span), glow.color);
    ctx.set_fill_style_canvas_gradient(&bottom);
    ctx.fill_rect(0.0, h - span, w, span);

    ctx.restore();
}
