//! Cloud job configuration support: the codec extension and its JSON façade.

pub mod codec;
pub mod json;

pub use codec::{CloudJobConfigurationExtension, CloudJobFieldBuffer};
