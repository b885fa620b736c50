pub mod render_ops;
pub mod template_ops;
