pub mod descriptor;
pub mod error;
pub mod events;
pub mod registry;
pub mod resolved;
pub mod view;

pub use descriptor::{ButtonAction, ButtonContext, ButtonDescriptor, Dynamic};
pub use error::RegistrationError;
pub use events::RegistryEvent;
pub use registry::{ButtonRegistry, Registration};
pub use resolved::ResolvedButton;
pub use view::ButtonsView;
