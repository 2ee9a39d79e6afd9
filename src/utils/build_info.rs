/// Build metadata embedded by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub built_on: &'static str,
    pub profile: &'static str,
}

pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("BALANCE_BUILD_HASH").unwrap_or("unknown"),
        built_on: option_env!("BALANCE_BUILD_DATE").unwrap_or("unknown"),
        profile: option_env!("BALANCE_BUILD_PROFILE").unwrap_or("unknown"),
    }
}

/// One-line banner, e.g. `balance 0.1.0 (1a2b3c4-clean, release, built 2024-03-09)`.
pub fn banner() -> String {
    let meta = current();
    format!(
        "balance {} ({}, {}, built {})",
        meta.version, meta.git_hash, meta.profile, meta.built_on
    )
}
