//! Scaffold a site.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use topicnav_topics::TOPICS_FILE;

/// Write the starter files, skipping existing ones unless `overwrite` is set.
///
/// Returns the files that were written.
pub fn scaffold(config_path: &Path, site_dir: &Path, overwrite: bool) -> Result<Vec<PathBuf>> {
    let files = [
        (config_path.to_path_buf(), DEFAULT_CONFIG),
        (site_dir.join(TOPICS_FILE), DEFAULT_TOPICS),
        (site_dir.join("intro.html"), DEFAULT_INTRO),
        (site_dir.join("guides/setup.html"), DEFAULT_SETUP),
        (site_dir.join("guides/navigation.html"), DEFAULT_NAVIGATION),
    ];

    let mut written = Vec::new();
    for (path, content) in files {
        if path.exists() && !overwrite {
            tracing::debug!("Keeping existing {}", path.display());
            continue;
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Created {}", path.display());
        written.push(path);
    }

    Ok(written)
}

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing topicnav...");

    let site_dir = Path::new("site");
    if site_dir.exists() && !yes {
        tracing::warn!("site/ directory already exists. Use --yes to overwrite.");
        return Ok(());
    }

    scaffold(config_path, site_dir, yes)?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'topicnav dev' to start the development server.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# topicnav configuration

[site]
# Directory holding topics.json and the page fragments
dir = "site"

# Output directory for built site
output = "dist"

# Site title
title = "My Documentation"

# Base URL (for deployment)
base_url = "/"

# Page shown before the first click
home = "intro.html"

# UI framework assets
styles = [
  "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css",
  "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css",
]
scripts = [
  "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/js/bootstrap.bundle.min.js",
]

[build]
minify = true

[server]
port = 7777
host = "127.0.0.1"
"#;

const DEFAULT_TOPICS: &str = r#"{
  "topics": [
    { "title": "Introduction", "page": "intro.html" },
    {
      "title": "Guides",
      "children": [
        { "title": "Setup", "page": "guides/setup.html" },
        { "title": "Navigation", "page": "guides/navigation.html" }
      ]
    },
    {
      "title": "Reference",
      "children": [
        { "title": "Dependency graph", "page": "https://example.com/graph" },
        { "title": "Coming soon" }
      ]
    }
  ]
}
"#;

const DEFAULT_INTRO: &str = r#"<h1>Welcome</h1>
<p>This site is navigated through <code>topics.json</code>. Every entry with a
<code>page</code> loads that fragment into this pane.</p>
"#;

const DEFAULT_SETUP: &str = r#"<h1>Setup</h1>
<p>Edit <code>site/topics.json</code> to change the navigation, and add HTML
fragments next to it.</p>
<pre><code>topicnav dev</code></pre>
"#;

const DEFAULT_NAVIGATION: &str = r#"<h1>Navigation</h1>
<ul>
  <li>Entries with children become folders in the sidebar and dropdowns in the top menu.</li>
  <li>Entries whose page contains <code>graph</code> open in a new tab.</li>
  <li>Entries with neither do nothing when clicked.</li>
</ul>
"#;
