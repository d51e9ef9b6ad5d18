pub mod config;
pub mod core;
pub mod language;
pub mod phrase_table;
pub mod placeholder;
pub mod providers;
pub mod registry;
pub mod resolver;
pub mod session;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::TranslatorConfig;
pub use core::types::*;
pub use resolver::{TranslationResolver, TranslationResolverBuilder};
pub use session::CaptureSession;
