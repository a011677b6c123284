//! Static site generation: the component renderer, the markup fragment
//! tree it produces, and the generator that compiles a project's pages
//! into a deployable file mapping.

pub mod fragment;
pub mod render;
pub mod scaffold;
pub mod site;

pub use fragment::{Element, Fragment};
pub use render::{render, render_document};
pub use site::generate_site;
