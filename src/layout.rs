//! Layout tree model.
//!
//! A layout is a tree of windows, notebooks, splits and terminals. Nesting is
//! constrained by two disjoint element sets:
//!
//! - [`AnyElement`]: legal as a window's direct child (window or notebook)
//! - [`ContainedElement`]: legal inside a split or notebook tab (terminal or split)
//!
//! Every node gets its identifier when it is constructed and keeps it for the
//! rest of the run.

use crate::config::ConfigValue;
use crate::error::{LayoutError, Result};
use crate::ids::IdGenerator;
use std::fmt;
use std::num::NonZeroU64;

/// Direction of a two-way split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Children side by side (terminator: `HPaned`).
    Horizontal,
    /// Children stacked (terminator: `VPaned`).
    Vertical,
}

impl Orientation {
    /// Node type written to the `type` field.
    pub fn paned_type(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "HPaned",
            Orientation::Vertical => "VPaned",
        }
    }

    /// Kind prefix used for the node identifier.
    pub fn split_kind(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal_split",
            Orientation::Vertical => "vertical_split",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }
}

/// Digits after the decimal point when a ratio is written out.
const RATIO_PRECISION: usize = 16;

/// Share of a split given to its first child, kept as an exact fraction.
///
/// Displayed with a fixed 16 decimals, rounded half up from the exact value,
/// so `2/3` is written as `0.6666666666666667`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ratio {
    left: u64,
    total: NonZeroU64,
}

impl Ratio {
    pub fn new(left: u64, total: NonZeroU64) -> Self {
        Self { left, total }
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Long division, one extra digit for rounding.
        let total = self.total.get();
        let mut digits = Vec::with_capacity(RATIO_PRECISION + 1);
        let mut whole = self.left / total;
        let mut rem = self.left % total;
        for _ in 0..=RATIO_PRECISION {
            rem *= 10;
            digits.push((rem / total) as u8);
            rem %= total;
        }

        if digits.pop().is_some_and(|d| d >= 5) {
            let mut carry = true;
            for d in digits.iter_mut().rev() {
                if *d == 9 {
                    *d = 0;
                } else {
                    *d += 1;
                    carry = false;
                    break;
                }
            }
            if carry {
                whole += 1;
            }
        }

        write!(f, "{}.", whole)?;
        for d in digits {
            write!(f, "{}", d)?;
        }
        Ok(())
    }
}

/// A top-level terminator window.
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    pub id: String,
    pub maximised: ConfigValue,
    pub fullscreen: ConfigValue,
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub child: Box<AnyElement>,
}

impl Window {
    pub fn new(
        ids: &mut dyn IdGenerator,
        maximised: ConfigValue,
        fullscreen: ConfigValue,
        (width, height): (u32, u32),
        title: impl Into<String>,
        child: AnyElement,
    ) -> Self {
        Self {
            id: ids.node_id("window"),
            maximised,
            fullscreen,
            width,
            height,
            title: title.into(),
            child: Box::new(child),
        }
    }
}

/// A tabbed container.
#[derive(Debug, Clone, PartialEq)]
pub struct Notebook {
    pub id: String,
    pub tabs: Vec<Tab>,
}

impl Notebook {
    pub fn new(ids: &mut dyn IdGenerator, tabs: Vec<Tab>) -> Self {
        Self {
            id: ids.node_id("notebook"),
            tabs,
        }
    }

    /// Tab titles joined the way terminator expects its `labels` field.
    pub fn labels(&self) -> String {
        self.tabs
            .iter()
            .map(|t| t.title.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One notebook page. Has no identifier of its own; its content is rendered
/// directly under the notebook.
#[derive(Debug, Clone, PartialEq)]
pub struct Tab {
    pub title: String,
    pub content: ContainedElement,
}

/// A terminal whose command comes from a named template.
#[derive(Debug, Clone, PartialEq)]
pub struct Terminal {
    pub id: String,
    pub title: String,
    pub template_name: String,
    pub group: String,
    pub profile: String,
    pub arguments: Vec<String>,
}

impl Terminal {
    pub fn new(
        ids: &mut dyn IdGenerator,
        title: impl Into<String>,
        template_name: impl Into<String>,
        group: impl Into<String>,
        profile: impl Into<String>,
        arguments: Vec<String>,
    ) -> Self {
        Self {
            id: ids.node_id("templated_terminal"),
            title: title.into(),
            template_name: template_name.into(),
            group: group.into(),
            profile: profile.into(),
            arguments,
        }
    }
}

/// A two-way split. `ratio` is only set when built from a spread.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub id: String,
    pub orientation: Orientation,
    pub first: Box<ContainedElement>,
    pub second: Box<ContainedElement>,
    pub ratio: Option<Ratio>,
}

impl Split {
    pub fn new(
        ids: &mut dyn IdGenerator,
        orientation: Orientation,
        first: ContainedElement,
        second: ContainedElement,
        ratio: Option<Ratio>,
    ) -> Self {
        Self {
            id: ids.node_id(orientation.split_kind()),
            orientation,
            first: Box::new(first),
            second: Box::new(second),
            ratio,
        }
    }
}

/// Elements legal as a window's direct child.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyElement {
    Window(Window),
    Notebook(Notebook),
}

/// Elements legal inside a split or a notebook tab.
#[derive(Debug, Clone, PartialEq)]
pub enum ContainedElement {
    Terminal(Terminal),
    Split(Split),
}

impl ContainedElement {
    /// Number of terminals in this subtree.
    pub fn leaf_count(&self) -> usize {
        match self {
            ContainedElement::Terminal(_) => 1,
            ContainedElement::Split(s) => s.first.leaf_count() + s.second.leaf_count(),
        }
    }
}

/// Any layout node, before it is placed into a typed slot.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutElement {
    Window(Window),
    Notebook(Notebook),
    Terminal(Terminal),
    Split(Split),
}

impl LayoutElement {
    pub fn kind(&self) -> &'static str {
        match self {
            LayoutElement::Window(_) => "window",
            LayoutElement::Notebook(_) => "notebook",
            LayoutElement::Terminal(_) => "templated_terminal",
            LayoutElement::Split(s) => s.orientation.split_kind(),
        }
    }

    /// Narrow to a window child.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Schema`] for terminals and splits; `raw` is the
    /// JSON the element was parsed from.
    pub fn into_any(self, raw: &serde_json::Value) -> Result<AnyElement> {
        match self {
            LayoutElement::Window(w) => Ok(AnyElement::Window(w)),
            LayoutElement::Notebook(n) => Ok(AnyElement::Notebook(n)),
            other => Err(LayoutError::schema(
                format!("window content ({} must be inside a notebook tab)", other.kind()),
                raw,
            )),
        }
    }

    /// Narrow to a split or tab child.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Schema`] for windows and notebooks.
    pub fn into_contained(self, raw: &serde_json::Value) -> Result<ContainedElement> {
        match self {
            LayoutElement::Terminal(t) => Ok(ContainedElement::Terminal(t)),
            LayoutElement::Split(s) => Ok(ContainedElement::Split(s)),
            other => Err(LayoutError::schema(
                format!("split or tab content ({} cannot be nested here)", other.kind()),
                raw,
            )),
        }
    }
}
