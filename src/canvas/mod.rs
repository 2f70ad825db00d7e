pub mod bars_renderer;
pub mod render_loop;
pub mod surface;
