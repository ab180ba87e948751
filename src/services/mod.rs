pub mod link_service;
pub mod locale;
pub mod redirect;

pub use link_service::{AddLinkRequest, AddOutcome, LinkListing, LinkService, RemoveOutcome};
pub use redirect::{RedirectService, Resolution, ResolveRequest, TargetSource};
