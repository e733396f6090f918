//! Template discovery.

pub mod locator;

pub use locator::{LocatedTemplate, TemplateLocator, TemplateSource};
