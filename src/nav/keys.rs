//! Keyboard commands understood by the navigation bar.

/// A navigation key, decoded from `KeyboardEvent.key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    /// `ArrowRight` or `ArrowDown`
    Next,
    /// `ArrowLeft` or `ArrowUp`
    Previous,
    Escape,
}

impl NavKey {
    /// ```rust
    /// use blogfront::nav::NavKey;
    ///
    /// assert_eq!(NavKey::from_key("ArrowDown"), Some(NavKey::Next));
    /// assert_eq!(NavKey::from_key("ArrowLeft"), Some(NavKey::Previous));
    /// assert_eq!(NavKey::from_key("Tab"), None);
    /// ```
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowRight" | "ArrowDown" => Some(Self::Next),
            "ArrowLeft" | "ArrowUp" => Some(Self::Previous),
            "Escape" => Some(Self::Escape),
            _ => None,
        }
    }

    /// Step through the link list, or `None` for non-movement keys.
    #[must_use]
    pub const fn offset(self) -> Option<isize> {
        match self {
            Self::Next => Some(1),
            Self::Previous => Some(-1),
            Self::Escape => None,
        }
    }
}

/// Index reached by moving `offset` from `current` in a ring of `len` links.
///
/// Focus outside the ring (`current == None`) lands on the first link. Returns
/// `None` for an empty ring.
#[must_use]
pub fn cycle(current: Option<usize>, offset: isize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let Some(current) = current else {
        return Some(0);
    };

    let len = isize::try_from(len).ok()?;
    let current = isize::try_from(current).ok()?;
    usize::try_from((current + offset).rem_euclid(len)).ok()
}
