//! Version information of the binary.

use metrics::gauge;

/// The version of the binary.
pub const SHORT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// The build profile name.
#[cfg(debug_assertions)]
pub const BUILD_PROFILE_NAME: &str = "debug";
/// The build profile name.
#[cfg(not(debug_assertions))]
pub const BUILD_PROFILE_NAME: &str = "release";

/// Exposes the version of the binary as the `morph_node_info` gauge.
pub fn register_version_metrics() {
    let labels: [(&str, &str); 2] =
        [("version", SHORT_VERSION), ("build_profile", BUILD_PROFILE_NAME)];
    gauge!("morph_node_info", &labels).set(1);
}
