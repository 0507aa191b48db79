//! Template engine for rendering the host page.

use minijinja::{context, Environment};

use topicnav_navigator::{ContentPane, ContentSource, Session};
use topicnav_render::ViewKind;

/// Site-wide settings shared by every rendered shell.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct SiteInfo {
    /// Site title
    pub title: String,
    /// Base URL
    pub base_url: String,
    /// Extra stylesheets (e.g. the UI framework)
    pub styles: Vec<String>,
    /// Extra scripts loaded before the runtime
    pub scripts: Vec<String>,
}

/// Context for rendering the shell template.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Context {
    /// Site settings
    pub site: SiteInfo,
    /// Inner HTML of the top menu mount
    pub top_menu: String,
    /// Inner HTML of the sidebar mount
    pub sidebar: String,
    /// Inner HTML of the mobile mount
    pub mobile: String,
    /// Inner HTML of the content pane
    pub content: String,
    /// Live reload script URL (dev server only)
    pub live_reload: Option<String>,
}

impl Context {
    /// Capture the current state of a session's mounts and content pane.
    pub fn from_session<S: ContentSource>(session: &Session<S>, site: &SiteInfo) -> Self {
        Self {
            site: site.clone(),
            top_menu: session.mount_html(ViewKind::TopMenu),
            sidebar: session.mount_html(ViewKind::Sidebar),
            mobile: session.mount_html(ViewKind::Mobile),
            content: session.content().html().to_string(),
            live_reload: None,
        }
    }
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template_owned("base.html".to_string(), BASE_TEMPLATE.to_string())
            .expect("Failed to add base template");

        env.add_template_owned("shell.html".to_string(), SHELL_TEMPLATE.to_string())
            .expect("Failed to add shell template");

        Self { env }
    }

    /// Render the host page.
    pub fn render_shell(&self, context: &Context) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("shell.html")?;

        tmpl.render(context! {
            site => &context.site,
            top_menu => &context.top_menu,
            sidebar => &context.sidebar,
            mobile => &context.mobile,
            content => &context.content,
            live_reload => &context.live_reload,
            side_id => ViewKind::Sidebar.mount_id(),
            mobile_id => ViewKind::Mobile.mount_id(),
            top_id => ViewKind::TopMenu.mount_id(),
            content_id => ContentPane::ID,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ site.title }}</title>
  {% for style in site.styles %}<link rel="stylesheet" href="{{ style }}">
  {% endfor %}<link rel="stylesheet" href="{{ site.base_url }}assets/main.css">
</head>
<body>
  {% block body %}{% endblock %}
  {% for script in site.scripts %}<script src="{{ script }}"></script>
  {% endfor %}<script src="{{ site.base_url }}assets/main.js"></script>
  {% if live_reload %}<script src="{{ live_reload }}"></script>{% endif %}
</body>
</html>"##;

const SHELL_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block body %}
<nav class="navbar navbar-expand-lg border-bottom">
  <div class="container-fluid">
    <button class="btn d-lg-none" type="button" data-bs-toggle="offcanvas" data-bs-target="#mobileNav" aria-controls="mobileNav">
      <i class="fa-solid fa-bars"></i>
    </button>
    <a class="navbar-brand" href="{{ site.base_url }}">{{ site.title }}</a>
    <ul class="navbar-nav me-auto d-none d-lg-flex" id="{{ top_id }}">{{ top_menu | safe }}</ul>
  </div>
</nav>

<div class="offcanvas offcanvas-start" tabindex="-1" id="mobileNav">
  <div class="offcanvas-header">
    <h5 class="offcanvas-title">{{ site.title }}</h5>
    <button type="button" class="btn-close" data-bs-dismiss="offcanvas" aria-label="Close"></button>
  </div>
  <div class="offcanvas-body">
    <div class="tree-nav" id="{{ mobile_id }}">{{ mobile | safe }}</div>
  </div>
</div>

<div class="layout">
  <aside class="sidebar d-none d-lg-block">
    <div class="tree-nav" id="{{ side_id }}">{{ sidebar | safe }}</div>
  </aside>
  <main class="main" id="{{ content_id }}">{{ content | safe }}</main>
</div>
{% endblock %}"##;
