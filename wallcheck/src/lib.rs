pub mod commands;
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use commands::command_argument_builder;
pub use handlers::{format_cookie_listing, parse_profile_arg, profiles_from_args};

// Re-export probe functionality from wallcheck-core
pub use wallcheck_core::probe::{
    CredentialProfile, ProbeOptions, RunReport, RunStatus, execute_probes,
};
