// Rendering Pipeline: slot registry, record → slot mapping, theme derivation,
// typing display and HTML emission through the page template.

pub mod page;
pub mod pipeline;
pub mod slots;
pub mod theme;
pub mod typing;

pub use pipeline::Renderer;
pub use slots::lock_page;
