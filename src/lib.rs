//! Greeting-card composition core.
//!
//! Owns the card and category records, the template materializer behind the
//! guided creation flow, render-time style resolution, and JSON slot
//! persistence. Painting, routing, and image export live outside this crate
//! and consume [`ops::render_ops::RenderPlan`].

pub mod io;
pub mod model;
pub mod ops;
pub mod store;
