//! Terminator config emission.
//!
//! [`Renderer`] walks a [`Config`] depth first and writes the terminator
//! config file line by line. Node sections are written before their
//! children, and every child names its parent explicitly, so the order of
//! the output is part of the format.
//!
//! # Output Format
//!
//! ```text
//! [global_config]
//!   borderless = True
//! [keybindings]
//!   full_screen = F11
//! [profiles]
//!   [[default]]
//!     scrollback_infinite = True
//!     exit_action = hold
//! [layouts]
//!   [[dev]]
//!     [[[window_...]]]
//!       type = Window
//!       parent = ""
//!       order = 0
//!       ...
//! [plugins]
//! ```
//!
//! Lines already written stay written when a later node fails.

use crate::config::{Config, KeyValue, Layout, Profile};
use crate::error::Result;
use crate::ids::IdGenerator;
use crate::layout::{AnyElement, ContainedElement, Notebook, Split, Terminal, Window};
use crate::template::TemplateRegistry;
use std::io::Write;

/// Ratio written for splits that were authored directly.
const DEFAULT_RATIO: &str = "0.5";

/// Writes a [`Config`] as a terminator config file.
pub struct Renderer<'a, W: Write> {
    out: W,
    templates: &'a TemplateRegistry,
    ids: &'a mut dyn IdGenerator,
}

impl<'a, W: Write> Renderer<'a, W> {
    /// Create a renderer. `templates` resolves terminal commands and `ids`
    /// supplies the per-terminal `uuid` field.
    pub fn new(out: W, templates: &'a TemplateRegistry, ids: &'a mut dyn IdGenerator) -> Self {
        Self {
            out,
            templates,
            ids,
        }
    }

    /// Consume the renderer and return the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write the whole document: global options, key bindings, profiles,
    /// layouts and an empty plugins section.
    ///
    /// # Errors
    ///
    /// - [`crate::LayoutError::TemplateNotFound`] if a terminal names an unknown template
    /// - [`crate::LayoutError::NotEnoughArguments`] / [`crate::LayoutError::TooManyArguments`]
    ///   if a terminal's arguments do not fit its template
    /// - [`crate::LayoutError::IoError`] if writing fails
    pub fn render_config(&mut self, config: &Config) -> Result<()> {
        writeln!(self.out, "[global_config]")?;
        for option in &config.global_config {
            self.render_key_value(option)?;
        }
        writeln!(self.out, "[keybindings]")?;
        for binding in &config.keybindings {
            self.render_key_value(binding)?;
        }
        writeln!(self.out, "[profiles]")?;
        for profile in &config.profiles {
            self.render_profile(profile)?;
        }
        writeln!(self.out, "[layouts]")?;
        for layout in &config.layouts {
            self.render_layout(layout)?;
        }
        writeln!(self.out, "[plugins]")?;
        Ok(())
    }

    fn render_key_value(&mut self, kv: &KeyValue) -> Result<()> {
        writeln!(self.out, "  {} = {}", kv.key, kv.value)?;
        Ok(())
    }

    fn render_profile(&mut self, profile: &Profile) -> Result<()> {
        writeln!(self.out, "  [[{}]]", profile.name)?;
        writeln!(self.out, "    scrollback_infinite = {}", profile.scrollback_infinite)?;
        writeln!(self.out, "    exit_action = {}", profile.exit_action)?;
        if let Some(ref font) = profile.font {
            writeln!(self.out, "    use_system_font = False")?;
            writeln!(self.out, "    font = {}", font)?;
        }
        Ok(())
    }

    /// Write one layout and all of its windows.
    pub fn render_layout(&mut self, layout: &Layout) -> Result<()> {
        log::debug!("rendering layout '{}'", layout.name);
        writeln!(self.out, "  [[{}]]", layout.name)?;
        for window in &layout.windows {
            self.render_window(window)?;
        }
        Ok(())
    }

    fn node_header(&mut self, id: &str, node_type: &str, parent: &str, order: usize) -> Result<()> {
        writeln!(self.out, "    [[[{}]]]", id)?;
        writeln!(self.out, "      type = {}", node_type)?;
        writeln!(self.out, "      parent = {}", parent)?;
        writeln!(self.out, "      order = {}", order)?;
        Ok(())
    }

    /// Windows are always roots: `parent` is empty and `order` is 0.
    pub fn render_window(&mut self, window: &Window) -> Result<()> {
        self.node_header(&window.id, "Window", "\"\"", 0)?;
        writeln!(self.out, "      maximised = {}", window.maximised)?;
        writeln!(self.out, "      fullscreen = {}", window.fullscreen)?;
        writeln!(self.out, "      size = {}, {}", window.width, window.height)?;
        writeln!(self.out, "      title = {}", window.title)?;
        self.render_any(&window.child, &window.id, 0)
    }

    fn render_any(&mut self, element: &AnyElement, parent: &str, order: usize) -> Result<()> {
        match element {
            AnyElement::Window(w) => self.render_window(w),
            AnyElement::Notebook(n) => self.render_notebook(n, parent, order),
        }
    }

    /// Render an element that sits inside a split or a tab.
    pub fn render_contained(
        &mut self,
        element: &ContainedElement,
        parent: &str,
        order: usize,
    ) -> Result<()> {
        match element {
            ContainedElement::Terminal(t) => self.render_terminal(t, parent, order),
            ContainedElement::Split(s) => self.render_split(s, parent, order),
        }
    }

    /// A notebook with fewer than two tabs is not written. Its only tab, if
    /// any, is rendered in the notebook's place.
    fn render_notebook(&mut self, notebook: &Notebook, parent: &str, order: usize) -> Result<()> {
        match notebook.tabs.as_slice() {
            [] => {
                log::warn!("notebook {} has no tabs, skipping it", notebook.id);
                Ok(())
            }
            [only] => {
                log::warn!(
                    "notebook {} has a single tab '{}', rendering its content without a notebook",
                    notebook.id,
                    only.title
                );
                self.render_contained(&only.content, parent, order)
            }
            tabs => {
                self.node_header(&notebook.id, "Notebook", parent, order)?;
                writeln!(self.out, "      labels = {}", notebook.labels())?;
                writeln!(self.out, "      active_page = 0")?;
                for (i, tab) in tabs.iter().enumerate() {
                    self.render_contained(&tab.content, &notebook.id, i)?;
                }
                Ok(())
            }
        }
    }

    fn render_split(&mut self, split: &Split, parent: &str, order: usize) -> Result<()> {
        self.node_header(&split.id, split.orientation.paned_type(), parent, order)?;
        match split.ratio {
            Some(ratio) => writeln!(self.out, "      ratio = {}", ratio)?,
            None => writeln!(self.out, "      ratio = {}", DEFAULT_RATIO)?,
        }
        self.render_contained(&split.first, &split.id, 0)?;
        self.render_contained(&split.second, &split.id, 1)
    }

    fn render_terminal(&mut self, terminal: &Terminal, parent: &str, order: usize) -> Result<()> {
        let command = self
            .templates
            .get(&terminal.template_name)?
            .render(&terminal.arguments)?;

        self.node_header(&terminal.id, "Terminal", parent, order)?;
        writeln!(self.out, "      title = {}", terminal.title)?;
        writeln!(self.out, "      group = {}", terminal.group)?;
        writeln!(self.out, "      profile = {}", terminal.profile)?;
        writeln!(self.out, "      uuid = {}", self.ids.uuid())?;
        writeln!(self.out, "      command = {}", command)?;
        Ok(())
    }
}

/// Render `config` into a string.
pub fn render_to_string(config: &Config, ids: &mut dyn IdGenerator) -> Result<String> {
    let mut renderer = Renderer::new(Vec::new(), &config.templates, ids);
    renderer.render_config(config)?;
    Ok(String::from_utf8_lossy(&renderer.into_inner()).into_owned())
}

/// Write the names of the layouts, profiles and command templates a config
/// defines, one section per non-empty kind.
pub fn write_listing(config: &Config, mut out: impl Write) -> Result<()> {
    let sections = [
        ("Layouts", config.list_layouts()),
        ("Profiles", config.list_profiles()),
        ("Command templates", config.templates.names()),
    ];

    let mut first = true;
    for (title, names) in sections {
        if names.is_empty() {
            continue;
        }
        if !first {
            writeln!(out)?;
        }
        first = false;
        writeln!(out, "{}:", title)?;
        for name in names {
            writeln!(out, "  {}", name)?;
        }
    }
    Ok(())
}
