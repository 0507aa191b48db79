//! Static site builder for topicnav.
//!
//! Pre-renders the host page with all three navigation views baked in, then
//! copies the site directory next to it so the runtime script can fetch the
//! page fragments.

pub mod assets;
pub mod builder;
pub mod templates;

pub use assets::AssetPipeline;
pub use builder::{BuildConfig, BuildError, BuildResult, StaticBuilder};
pub use templates::{Context, SiteInfo, TemplateEngine};
