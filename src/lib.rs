pub mod buttons;
pub mod config;
pub mod i18n;
pub mod manifest;
pub mod paths;

pub use buttons::{
    ButtonAction, ButtonContext, ButtonDescriptor, ButtonRegistry, ButtonsView, Dynamic, Registration,
    RegistrationError, RegistryEvent, ResolvedButton,
};
pub use i18n::{Catalog, Translator};
