// Builder: the multi-step form behind the overlay. Wizard navigation, skill
// selection, profile image, form capture, and the submit / page-load flows that
// tie them to the store and the renderer.

pub mod form;
pub mod handlers;
pub mod image;
pub mod service;
pub mod session;
pub mod skills;
pub mod wizard;
