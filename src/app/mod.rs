//! Application orchestration module

pub mod initialization;
pub mod execution;

pub use initialization::{
    load_configuration,
    configure_logging,
    resolve_options_dir,
    initialize_builtin_plugins,
};
pub use execution::execute;
