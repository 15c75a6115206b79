pub mod classify;
pub mod client;
pub mod cookies;
pub mod descriptor;
pub mod error;
pub mod markup;
pub mod prober;
pub mod result;

pub use classify::classify;
pub use client::{ClientOptions, ProbeClient};
pub use cookies::{CookieEntry, CredentialSet};
pub use descriptor::EmbedDescriptor;
pub use error::ProbeError;
pub use prober::Prober;
pub use result::{ClassifiedOutcome, FetchedPage, ProbeOutcome};
