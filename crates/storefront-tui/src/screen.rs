//! Screen identifier enum — the navigation graph is a list with two leaves.

use std::fmt;

/// Identifies each TUI screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    /// The product catalog list (start destination).
    #[default]
    Products,
    /// Detail view for one product.
    Detail,
    /// Static profile page with the persisted avatar reference.
    Profile,
}

impl ScreenId {
    /// Short label for the header bar.
    pub fn label(self) -> &'static str {
        match self {
            Self::Products => "Products",
            Self::Detail => "Detail",
            Self::Profile => "Profile",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
