//! Asset pipeline for the shell's CSS and runtime script.

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the main CSS file.
    pub fn generate_css() -> String {
        DEFAULT_CSS.to_string()
    }

    /// Generate the browser runtime.
    pub fn generate_js() -> String {
        DEFAULT_JS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

const DEFAULT_CSS: &str = r#"/* topicnav shell */

:root {
  --sidebar-width: 280px;
  --tree-indent: 1rem;
  --tree-active-bg: rgba(13, 110, 253, 0.12);
}

.layout {
  display: grid;
  grid-template-columns: var(--sidebar-width) 1fr;
  min-height: calc(100vh - 56px);
}

.sidebar {
  border-right: 1px solid rgba(0, 0, 0, 0.1);
  padding: 1rem 0.5rem;
  position: sticky;
  top: 0;
  height: calc(100vh - 56px);
  overflow-y: auto;
}

.main {
  padding: 1.5rem 2rem;
  min-width: 0;
}

/* Tree views */
.tree-nav ul {
  list-style: none;
  margin: 0;
  padding-left: 0;
}

.tree-nav ul ul {
  padding-left: var(--tree-indent);
}

.tree-nav a.tree-item {
  display: flex;
  align-items: center;
  gap: 0.4rem;
  padding: 0.25rem 0.5rem;
  border-radius: 0.375rem;
  color: inherit;
  text-decoration: none;
}

.tree-nav a.tree-item:hover {
  background: rgba(0, 0, 0, 0.05);
}

.tree-nav a.tree-item.active {
  background: var(--tree-active-bg);
  font-weight: 600;
}

.tree-nav .caret {
  width: 0.75rem;
  transition: transform 0.15s;
}

.tree-nav .caret.rotate {
  transform: rotate(90deg);
}

/* Nested navbar submenus */
.dropdown-submenu {
  position: relative;
}

.dropdown-submenu > .dropdown-menu {
  top: 0;
  left: 100%;
  margin-top: -0.25rem;
}

.dropdown-submenu > .dropdown-menu.show {
  display: block;
}

@media (max-width: 991px) {
  .layout {
    grid-template-columns: 1fr;
  }
}
"#;

const DEFAULT_JS: &str = r#"// topicnav runtime
(function() {
  'use strict';

  const content = document.getElementById('contentArea');

  async function loadPage(url, push) {
    if (!url) return;
    if (url.includes('graph')) {
      window.open(url, '_blank');
      return;
    }
    try {
      const res = await fetch(url);
      if (!res.ok) throw new Error(res.status);
      content.innerHTML = await res.text();
    } catch (e) {
      const code = document.createElement('code');
      code.textContent = url;
      content.innerHTML = '<div class="alert alert-warning">Content not found: </div>';
      content.firstChild.appendChild(code);
      return;
    }

    const open = document.querySelector('.offcanvas.show');
    if (open && window.bootstrap) bootstrap.Offcanvas.getInstance(open)?.hide();

    document.querySelectorAll('.tree-nav a.tree-item.active')
      .forEach(a => a.classList.remove('active'));
    document.querySelectorAll('.tree-nav a.tree-item[data-url="' + CSS.escape(url) + '"]')
      .forEach(a => a.classList.add('active'));

    if (push) history.pushState({ url }, '', location.pathname + '#' + encodeURI(url));
  }

  function toggle(row) {
    const li = row.parentElement;
    const sub = li.querySelector(':scope > ul');
    const expanded = row.getAttribute('aria-expanded') === 'true';
    row.setAttribute('aria-expanded', String(!expanded));
    row.querySelector('.caret')?.classList.toggle('rotate', !expanded);
    if (sub) sub.style.display = expanded ? 'none' : 'block';
    if (li.closest('#sideTree')) li.classList.toggle('open', !expanded);
  }

  function openSubmenu(trigger) {
    const li = trigger.parentElement;
    li.parentElement.querySelectorAll(':scope > .dropdown-submenu .dropdown-menu.show')
      .forEach(m => m.classList.remove('show'));
    trigger.nextElementSibling?.classList.add('show');
  }

  document.addEventListener('click', (e) => {
    const row = e.target.closest('[data-action]');
    if (!row) return;
    switch (row.dataset.action) {
      case 'toggle':
        e.preventDefault();
        toggle(row);
        break;
      case 'navigate':
        e.preventDefault();
        loadPage(row.dataset.url, true);
        break;
    }
  });

  // Bound per trigger so the click stops before Bootstrap's document handlers.
  document.querySelectorAll('#topMenu .dropdown-submenu > a').forEach(trigger => {
    trigger.addEventListener('click', (e) => {
      e.preventDefault();
      e.stopPropagation();
      openSubmenu(trigger);
    });
  });

  document.querySelectorAll('#topMenu .dropdown').forEach(dd => {
    dd.addEventListener('hide.bs.dropdown', () => {
      dd.querySelectorAll('.dropdown-menu.show').forEach(m => m.classList.remove('show'));
    });
  });

  window.addEventListener('popstate', () => {
    const url = decodeURI(location.hash.slice(1));
    if (url) loadPage(url, false);
  });
})();
"#;
