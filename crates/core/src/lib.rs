pub mod component;
pub mod config;
pub mod error;
pub mod layout;
pub mod templates;
pub mod types;

pub use component::{Component, ComponentKind, KindInfo, default_props, kind_catalog};
pub use config::load_site;
pub use error::{Error, Result};
pub use layout::LayoutDocument;
pub use templates::PageTemplate;
pub use types::*;
